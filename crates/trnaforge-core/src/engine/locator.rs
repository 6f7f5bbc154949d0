use super::config::LocatorConfig;
use crate::core::models::anticodon::Anticodon;
use std::ops::Range;
use tracing::{debug, warn};

const ANTICODON_LEN: usize = 3;

/// How a mutation was placed into the sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationMethod {
    /// The structure-derived window held the expected anticodon.
    Structural { start: usize },
    /// The structure window did not match; the first occurrence of the
    /// anticodon in the sequence was replaced instead.
    Substring { start: usize },
    /// The anticodon could not be found; the sequence is unchanged.
    NotFound,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mutation {
    pub sequence: String,
    pub method: MutationMethod,
}

/// Finds the anticodon of a tRNA from its tRNAscan-SE bracket structure.
///
/// The anticodon loop is found through the first occurrence of `loop_marker`
/// (`<.>` by default). Scanning starts at the marker's last character, skips a
/// contiguous run of `>`, and the anticodon begins `anticodon_offset`
/// positions further on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnticodonLocator {
    loop_marker: Vec<char>,
    anticodon_offset: usize,
}

impl Default for AnticodonLocator {
    fn default() -> Self {
        Self::from_config(&LocatorConfig::default())
    }
}

impl AnticodonLocator {
    pub fn new(loop_marker: &str, anticodon_offset: usize) -> Self {
        Self {
            loop_marker: loop_marker.chars().collect(),
            anticodon_offset,
        }
    }

    pub fn from_config(config: &LocatorConfig) -> Self {
        Self::new(&config.loop_marker, config.anticodon_offset)
    }

    /// Returns the character range of the anticodon, or `None` when the marker
    /// is absent or the window would run past the end of the structure.
    pub fn locate(&self, structure: &str) -> Option<Range<usize>> {
        if self.loop_marker.is_empty() {
            return None;
        }
        let chars: Vec<char> = structure.chars().collect();
        let marker_at = chars
            .windows(self.loop_marker.len())
            .position(|window| window == self.loop_marker.as_slice())?;

        let mut i = marker_at + self.loop_marker.len() - 1;
        while i < chars.len() && chars[i] == '>' {
            i += 1;
        }
        let start = i + self.anticodon_offset;
        let end = start + ANTICODON_LEN;
        (end <= chars.len()).then_some(start..end)
    }

    /// Replaces `original` with `replacement` in `sequence`.
    ///
    /// Both anticodons are written in the sequence's own alphabet (RNA if it
    /// contains `U`, DNA otherwise) and the replacement takes on the letter
    /// case of the window it overwrites. The structural window is used only if
    /// the structure is as long as the sequence and the window holds the
    /// expected anticodon; otherwise the first case-insensitive occurrence of
    /// the anticodon is replaced. The output always has the input's length.
    pub fn mutate(
        &self,
        trna_id: &str,
        sequence: &str,
        structure: &str,
        original: &Anticodon,
        replacement: &Anticodon,
    ) -> Mutation {
        let mut residues: Vec<char> = sequence.chars().collect();
        let is_rna = residues.iter().any(|c| c.eq_ignore_ascii_case(&'U'));
        let render = |anticodon: &Anticodon| -> Vec<char> {
            if is_rna {
                anticodon.to_rna_string().chars().collect()
            } else {
                anticodon.to_dna_string().chars().collect()
            }
        };
        let expected = render(original);
        let new_bases = render(replacement);

        let structural = (structure.chars().count() == residues.len())
            .then(|| self.locate(structure))
            .flatten()
            .filter(|window| matches_ignore_case(&residues[window.clone()], &expected));

        let (start, method) = match structural {
            Some(window) => (
                window.start,
                MutationMethod::Structural {
                    start: window.start,
                },
            ),
            None => match find_ignore_case(&residues, &expected) {
                Some(start) => {
                    debug!(
                        trna_id,
                        start, "Structural anticodon window did not match; using substring search."
                    );
                    (start, MutationMethod::Substring { start })
                }
                None => {
                    warn!(
                        trna_id,
                        anticodon = %original,
                        "Anticodon not found in sequence; leaving it unmodified."
                    );
                    return Mutation {
                        sequence: sequence.to_string(),
                        method: MutationMethod::NotFound,
                    };
                }
            },
        };

        for (offset, base) in new_bases.into_iter().enumerate() {
            let slot = &mut residues[start + offset];
            *slot = if slot.is_ascii_lowercase() {
                base.to_ascii_lowercase()
            } else {
                base
            };
        }

        Mutation {
            sequence: residues.into_iter().collect(),
            method,
        }
    }
}

fn matches_ignore_case(window: &[char], expected: &[char]) -> bool {
    window.len() == expected.len()
        && window
            .iter()
            .zip(expected)
            .all(|(a, b)| a.eq_ignore_ascii_case(b))
}

fn find_ignore_case(haystack: &[char], needle: &[char]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| matches_ignore_case(window, needle))
}
