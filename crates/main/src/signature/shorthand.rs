//! Shorthand signature notation: `question, context -> answer`.

use tracing::debug;

use crate::{
    error::{Error, MalformedReason, Result, Side},
    legacy::{LegacyField, LegacySignature},
};

const ARROW: &str = "->";

/// Parse `"<inputs> -> <outputs>"` into an untyped signature.
///
/// The text must contain exactly one `->`. Each side is a comma-separated
/// list of field names; names are trimmed and must not be empty. Parsed
/// fields are text fields with no description and no prefix.
///
/// ```rust
/// use tysig::parse_shorthand;
///
/// let sig = parse_shorthand("question, context -> answer").unwrap();
/// assert_eq!(sig.inputs.len(), 2);
/// assert_eq!(sig.outputs[0].name, "answer");
///
/// assert!(parse_shorthand("question").is_err());
/// assert!(parse_shorthand("a -> b -> c").is_err());
/// ```
pub fn parse_shorthand(text: &str) -> Result<LegacySignature> {
    let parts: Vec<&str> = text.split(ARROW).collect();
    let [inputs, outputs] = parts.as_slice() else {
        debug!(text, arrows = parts.len() - 1, "rejected shorthand signature");
        return Err(Error::malformed(
            text,
            MalformedReason::ArrowCount(parts.len() - 1),
        ));
    };

    let inputs = parse_side(text, inputs, Side::Inputs)?;
    let outputs = parse_side(text, outputs, Side::Outputs)?;
    Ok(LegacySignature::new(inputs, outputs))
}

fn parse_side(text: &str, side_text: &str, side: Side) -> Result<Vec<LegacyField>> {
    side_text
        .split(',')
        .map(str::trim)
        .enumerate()
        .map(|(index, name)| {
            if name.is_empty() {
                debug!(text, %side, index, "empty field name in shorthand signature");
                Err(Error::malformed(
                    text,
                    MalformedReason::EmptyField { side, index },
                ))
            } else {
                Ok(LegacyField::named(name))
            }
        })
        .collect()
}
