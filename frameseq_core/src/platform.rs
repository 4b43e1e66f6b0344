//! Platform path resolution
//!
//! Everything here asks the operating system for paths. The rest of the
//! core treats the returned values as opaque [`crate::PathName`] input.

pub mod path_handling;

pub use path_handling::{DirectoryShortcut, PathResolver, PlatformPathResolver};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shortcut_listing_is_complete() {
        assert_eq!(DirectoryShortcut::ALL.len(), 4);
        for shortcut in DirectoryShortcut::ALL {
            assert!(!shortcut.as_str().is_empty());
        }
    }

    #[test]
    fn test_resolver_is_object_safe() {
        let resolver: Box<dyn PathResolver> = Box::new(PlatformPathResolver::new());
        assert!(resolver.current_dir().is_ok());
    }
}
