// Ontologizer run settings

use crate::GoError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Ontologizer enrichment calculation (`-c`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Calculation {
    #[serde(rename = "MGSA")]
    Mgsa,
    #[serde(rename = "Parent-Child-Intersection")]
    ParentChildIntersection,
    #[default]
    #[serde(rename = "Parent-Child-Union")]
    ParentChildUnion,
    #[serde(rename = "Term-For-Term")]
    TermForTerm,
    #[serde(rename = "Topology-Elim")]
    TopologyElim,
    #[serde(rename = "Topology-Weighted")]
    TopologyWeighted,
}

impl Calculation {
    pub const ALL: [Calculation; 6] = [
        Calculation::Mgsa,
        Calculation::ParentChildIntersection,
        Calculation::ParentChildUnion,
        Calculation::TermForTerm,
        Calculation::TopologyElim,
        Calculation::TopologyWeighted,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Calculation::Mgsa => "MGSA",
            Calculation::ParentChildIntersection => "Parent-Child-Intersection",
            Calculation::ParentChildUnion => "Parent-Child-Union",
            Calculation::TermForTerm => "Term-For-Term",
            Calculation::TopologyElim => "Topology-Elim",
            Calculation::TopologyWeighted => "Topology-Weighted",
        }
    }

    /// MGSA reports marginal posteriors where higher is better; every other
    /// calculation reports adjusted p-values where lower is better.
    pub fn higher_is_better(self) -> bool {
        matches!(self, Calculation::Mgsa)
    }

    /// Results table column holding the score for this calculation
    pub fn score_column(self) -> &'static str {
        if self.higher_is_better() {
            "marg"
        } else {
            "p.adjusted"
        }
    }

    /// Whether a row with `score` passes `threshold` (inclusive)
    pub fn passes(self, score: f64, threshold: f64) -> bool {
        if self.higher_is_better() {
            score >= threshold
        } else {
            score <= threshold
        }
    }
}

impl fmt::Display for Calculation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Calculation {
    type Err = GoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| GoError::Parse(format!("Unknown calculation: {}", s)))
    }
}

/// Multiple-testing correction (`-m`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MultipleTestingCorrection {
    #[serde(rename = "Benjamini-Hochberg")]
    BenjaminiHochberg,
    #[serde(rename = "Benjamini-Yekutieli")]
    BenjaminiYekutieli,
    Bonferroni,
    #[serde(rename = "Bonferroni-Holm")]
    BonferroniHolm,
    None,
    #[default]
    #[serde(rename = "Westfall-Young-Single-Step")]
    WestfallYoungSingleStep,
    #[serde(rename = "Westfall-Young-Step-Down")]
    WestfallYoungStepDown,
}

impl MultipleTestingCorrection {
    pub const ALL: [MultipleTestingCorrection; 7] = [
        MultipleTestingCorrection::BenjaminiHochberg,
        MultipleTestingCorrection::BenjaminiYekutieli,
        MultipleTestingCorrection::Bonferroni,
        MultipleTestingCorrection::BonferroniHolm,
        MultipleTestingCorrection::None,
        MultipleTestingCorrection::WestfallYoungSingleStep,
        MultipleTestingCorrection::WestfallYoungStepDown,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            MultipleTestingCorrection::BenjaminiHochberg => "Benjamini-Hochberg",
            MultipleTestingCorrection::BenjaminiYekutieli => "Benjamini-Yekutieli",
            MultipleTestingCorrection::Bonferroni => "Bonferroni",
            MultipleTestingCorrection::BonferroniHolm => "Bonferroni-Holm",
            MultipleTestingCorrection::None => "None",
            MultipleTestingCorrection::WestfallYoungSingleStep => "Westfall-Young-Single-Step",
            MultipleTestingCorrection::WestfallYoungStepDown => "Westfall-Young-Step-Down",
        }
    }
}

impl fmt::Display for MultipleTestingCorrection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MultipleTestingCorrection {
    type Err = GoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| GoError::Parse(format!("Unknown multiple-testing correction: {}", s)))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_calculation_round_trips_names() {
        for calculation in Calculation::ALL {
            assert_eq!(calculation.as_str().parse::<Calculation>().unwrap(), calculation);
        }
        assert_eq!("mgsa".parse::<Calculation>().unwrap(), Calculation::Mgsa);
        assert!("Fisher".parse::<Calculation>().is_err());
    }

    #[test]
    fn test_score_column() {
        assert_eq!(Calculation::Mgsa.score_column(), "marg");
        assert_eq!(Calculation::TermForTerm.score_column(), "p.adjusted");
    }

    #[test]
    fn test_threshold_direction() {
        assert!(Calculation::Mgsa.passes(0.9, 0.5));
        assert!(!Calculation::Mgsa.passes(0.1, 0.5));
        assert!(Calculation::ParentChildUnion.passes(0.01, 0.05));
        assert!(Calculation::ParentChildUnion.passes(0.05, 0.05));
        assert!(!Calculation::ParentChildUnion.passes(0.2, 0.05));
    }

    #[test]
    fn test_mtc_from_str() {
        assert_eq!(
            "benjamini-hochberg".parse::<MultipleTestingCorrection>().unwrap(),
            MultipleTestingCorrection::BenjaminiHochberg
        );
        assert_eq!(
            MultipleTestingCorrection::default().to_string(),
            "Westfall-Young-Single-Step"
        );
        assert!("Holm".parse::<MultipleTestingCorrection>().is_err());
    }
}
