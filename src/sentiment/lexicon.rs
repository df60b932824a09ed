// Sentiment lexicon loading.
//
// The VADER lexicon is a tab-separated text file: token, mean valence,
// standard deviation, then the raw rater scores. Only the first two columns
// matter for scoring.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

/// Token -> mean valence (roughly -4.0 to 4.0).
#[derive(Debug, Clone, Default)]
pub struct Lexicon {
    valences: HashMap<String, f64>,
}

impl Lexicon {
    /// Parse lexicon text. Blank lines are skipped; a malformed valence is
    /// an error naming the line.
    pub fn parse(source: &str) -> Result<Self> {
        let mut valences = HashMap::new();

        for (line_no, line) in source.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let mut columns = line.split('\t');
            let token = columns.next().unwrap_or_default().trim();
            let valence = columns
                .next()
                .with_context(|| format!("Lexicon line {} has no valence column", line_no + 1))?
                .trim()
                .parse::<f64>()
                .with_context(|| format!("Lexicon line {} has an invalid valence", line_no + 1))?;

            if !token.is_empty() {
                valences.insert(token.to_lowercase(), valence);
            }
        }

        Ok(Self { valences })
    }

    /// Load a lexicon file from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read lexicon {}", path.display()))?;
        let lexicon = Self::parse(&source)
            .with_context(|| format!("Failed to parse lexicon {}", path.display()))?;
        debug!(entries = lexicon.len(), path = %path.display(), "Loaded sentiment lexicon");
        Ok(lexicon)
    }

    /// Build a lexicon from in-memory pairs.
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, f64)>) -> Self {
        Self {
            valences: pairs
                .into_iter()
                .map(|(w, v)| (w.to_lowercase(), v))
                .collect(),
        }
    }

    /// Valence for a lowercase token.
    pub fn get(&self, token: &str) -> Option<f64> {
        self.valences.get(token).copied()
    }

    pub fn contains(&self, token: &str) -> bool {
        self.valences.contains_key(token)
    }

    pub fn len(&self) -> usize {
        self.valences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.valences.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_vader_format() {
        let source = "$:\t-1.5\t0.80623\t[-1, -1, -1, -1, -3, -1, -3, -1, -2, -1]\n\
                      \n\
                      horrible\t-2.5\t0.67082\t[-3, -2, -3, -2, -2, -4, -2, -3, -2, -2]\n";
        let lexicon = Lexicon::parse(source).unwrap();
        assert_eq!(lexicon.len(), 2);
        assert_eq!(lexicon.get("horrible"), Some(-2.5));
        assert_eq!(lexicon.get("$:"), Some(-1.5));
    }

    #[test]
    fn test_parse_rejects_bad_valence() {
        let err = Lexicon::parse("good\tnot-a-number\n").unwrap_err();
        assert!(err.to_string().contains("line 1"));
    }

    #[test]
    fn test_parse_rejects_missing_column() {
        assert!(Lexicon::parse("lonely-token\n").is_err());
    }
}
