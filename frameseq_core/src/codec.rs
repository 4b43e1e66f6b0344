//! Text conversion for frames, ranges and sequences
//!
//! Canonical forms:
//!
//! - frame: decimal digits, zero padded to the sequence width, `-` sign for
//!   negative frames (`"0042"`, `"-005"`)
//! - range: `"<frame>-<frame>"`
//! - sequence: comma separated frames and ranges (`"1-3,5-6"`)
//!
//! Parsing infers the padding width from zero padded tokens and rejects
//! input where some token would not render back to the same text under
//! that width.

use crate::error::{ParseError, Result};
use crate::frame::{Frame, FrameRange, FrameSequence};
use std::num::IntErrorKind;

/// Render a frame, zero padding its digits to `pad`
pub fn format_frame(frame: Frame, pad: usize) -> String {
    if frame < 0 {
        format!("-{:0pad$}", frame.unsigned_abs())
    } else {
        format!("{frame:0pad$}")
    }
}

/// Render a range as `"<min>-<max>"`, even when both endpoints are equal
pub fn format_range(range: &FrameRange, pad: usize) -> String {
    format!(
        "{}-{}",
        format_frame(range.min, pad),
        format_frame(range.max, pad)
    )
}

/// Render a sequence with its own padding
///
/// Single frame ranges collapse to a bare frame so the text parses back to
/// the same ranges.
pub fn format_sequence(sequence: &FrameSequence) -> String {
    let pad = sequence.pad();
    sequence
        .ranges()
        .iter()
        .map(|range| {
            if range.min == range.max {
                format_frame(range.min, pad)
            } else {
                format_range(range, pad)
            }
        })
        .collect::<Vec<_>>()
        .join(",")
}

/// Parse a single frame, returning it with the padding its text implies
pub fn parse_frame(text: &str) -> Result<(Frame, usize)> {
    let text = text.trim();
    let token = FrameToken::parse(text, text)?;
    let pad = infer_pad(&[token], text)?;
    Ok((token.frame, pad))
}

/// Parse `"<a>-<b>"` or a bare frame into a range and its padding
///
/// Both endpoints must agree on the padding width.
pub fn parse_range(text: &str) -> Result<(FrameRange, usize)> {
    let text = text.trim();
    let (range, tokens) = parse_range_token(text, text)?;
    let pad = infer_pad(&tokens, text)?;
    Ok((range, pad))
}

/// Parse a comma separated list of frames and ranges
///
/// Ranges are kept in textual order. Empty input yields an empty sequence.
pub fn parse_sequence(text: &str) -> Result<FrameSequence> {
    let input = text.trim();
    if input.is_empty() {
        return Ok(FrameSequence::new());
    }

    let mut ranges = Vec::new();
    let mut tokens = Vec::new();
    for part in input.split(',') {
        let part = part.trim();
        if part.is_empty() {
            return Err(ParseError::empty_token(input).into());
        }
        let (range, endpoints) = parse_range_token(part, input)?;
        ranges.push(range);
        tokens.extend(endpoints);
    }

    let pad = infer_pad(&tokens, input)?;
    Ok(FrameSequence::from_ranges(ranges, pad))
}

/// One parsed frame together with how it was written
#[derive(Debug, Clone, Copy)]
struct FrameToken<'a> {
    frame: Frame,
    /// The digits without a sign
    digits: &'a str,
}

impl<'a> FrameToken<'a> {
    fn parse(token: &'a str, input: &str) -> std::result::Result<Self, ParseError> {
        let digits = token.strip_prefix('-').unwrap_or(token);
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ParseError::invalid_token(token, input));
        }
        let frame = token.parse::<Frame>().map_err(|e| match e.kind() {
            IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => {
                ParseError::out_of_range(token)
            }
            _ => ParseError::invalid_token(token, input),
        })?;
        Ok(Self { frame, digits })
    }

    fn width(&self) -> usize {
        self.digits.len()
    }

    /// Zero padded tokens fix the width of the whole sequence
    fn is_padded(&self) -> bool {
        self.digits.len() > 1 && self.digits.starts_with('0')
    }

    /// Whether [`format_frame`] with `pad` reproduces this token
    fn renders_with(&self, pad: usize) -> bool {
        if self.is_padded() {
            self.width() == pad
        } else {
            self.width() >= pad
        }
    }
}

fn parse_range_token<'a>(
    token: &'a str,
    input: &str,
) -> Result<(FrameRange, Vec<FrameToken<'a>>)> {
    // Skip index 0 so a leading sign is not taken as the separator
    let split = token
        .char_indices()
        .skip(1)
        .find(|&(_, c)| c == '-')
        .map(|(i, _)| i);

    match split {
        Some(i) => {
            let (left, right) = (&token[..i], &token[i + 1..]);
            // Report the whole range token when an endpoint is malformed
            let endpoint = |text: &'a str| {
                FrameToken::parse(text, input).map_err(|e| match e {
                    ParseError::InvalidToken { .. } => ParseError::invalid_token(token, input),
                    other => other,
                })
            };
            let min = endpoint(left)?;
            let max = endpoint(right)?;
            Ok((FrameRange::new(min.frame, max.frame), vec![min, max]))
        }
        None => {
            let frame = FrameToken::parse(token, input)?;
            Ok((FrameRange::single(frame.frame), vec![frame]))
        }
    }
}

fn infer_pad(tokens: &[FrameToken<'_>], input: &str) -> Result<usize> {
    let pad = tokens
        .iter()
        .filter(|token| token.is_padded())
        .map(FrameToken::width)
        .max()
        .unwrap_or(0);

    match tokens.iter().find(|token| !token.renders_with(pad)) {
        Some(token) => Err(ParseError::inconsistent_padding(token.digits, input).into()),
        None => Ok(pad),
    }
}
