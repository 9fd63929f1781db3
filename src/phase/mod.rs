//! Life-phase resolution
//!
//! Maps a character's age to one of twelve ordered life phases via a
//! floor-lookup over a breakpoint table. Pure and total: every
//! non-negative age resolves to exactly one phase, and the phase index
//! never decreases as age grows.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Ordered life phases, each covering a contiguous age bracket.
///
/// The final bracket is open-ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Phase {
    EarlyInfancy,
    Preschool,
    MiddleChildhood,
    EarlyAdolescence,
    MidAdolescence,
    LateAdolescence,
    Youth,
    YoungAdult,
    MiddleAge,
    YoungSenior,
    MatureSenior,
    AdvancedAge,
}

/// Lower age bound of each phase, parallel to [`Phase::ALL`].
const BREAKPOINTS: [u32; 12] = [0, 3, 6, 11, 15, 18, 22, 30, 40, 60, 75, 90];

impl Phase {
    /// All phases in bracket order.
    pub const ALL: [Phase; 12] = [
        Phase::EarlyInfancy,
        Phase::Preschool,
        Phase::MiddleChildhood,
        Phase::EarlyAdolescence,
        Phase::MidAdolescence,
        Phase::LateAdolescence,
        Phase::Youth,
        Phase::YoungAdult,
        Phase::MiddleAge,
        Phase::YoungSenior,
        Phase::MatureSenior,
        Phase::AdvancedAge,
    ];

    /// Resolve the phase for an age by floor-lookup over the breakpoints.
    pub fn from_age(age: u32) -> Phase {
        // partition_point returns how many breakpoints are <= age; the
        // phase is the last bracket whose lower bound was reached.
        let idx = BREAKPOINTS.partition_point(|&b| b <= age);
        Phase::ALL[idx.saturating_sub(1)]
    }

    /// Position of this phase in bracket order.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Stable content key for this phase.
    ///
    /// Matches the legacy content directory names, so existing phase
    /// folders load unchanged.
    pub fn key(self) -> &'static str {
        match self {
            Phase::EarlyInfancy => "01-PrimeiraInfancia_0-3",
            Phase::Preschool => "02-SegundaInfancia_3-6",
            Phase::MiddleChildhood => "03-TerceiraInfancia_6-10",
            Phase::EarlyAdolescence => "04-AdolescenciaInicial_11-14",
            Phase::MidAdolescence => "05-AdolescenciaMedia_15-17",
            Phase::LateAdolescence => "06-AdolescenciaTardia_18-21",
            Phase::Youth => "07-Juventude_22-29",
            Phase::YoungAdult => "08-AdultoJovem_30-39",
            Phase::MiddleAge => "09-MeiaIdade_40-59",
            Phase::YoungSenior => "10-IdosoJovem_60-74",
            Phase::MatureSenior => "11-IdosoMaduro_75-89",
            Phase::AdvancedAge => "12-VelhiceAvancada_90",
        }
    }

    /// Human-readable stage label for presentation.
    pub fn label(self) -> &'static str {
        match self {
            Phase::EarlyInfancy => "Early Infancy",
            Phase::Preschool => "Preschool Years",
            Phase::MiddleChildhood => "Middle Childhood",
            Phase::EarlyAdolescence => "Early Adolescence",
            Phase::MidAdolescence => "Mid Adolescence",
            Phase::LateAdolescence => "Late Adolescence",
            Phase::Youth => "Youth",
            Phase::YoungAdult => "Young Adulthood",
            Phase::MiddleAge => "Middle Age",
            Phase::YoungSenior => "Early Seniority",
            Phase::MatureSenior => "Mature Seniority",
            Phase::AdvancedAge => "Advanced Age",
        }
    }

    /// Whether two ages fall in different phases.
    pub fn changed(previous_age: u32, current_age: u32) -> bool {
        Phase::from_age(previous_age) != Phase::from_age(current_age)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
