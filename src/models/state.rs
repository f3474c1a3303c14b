use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Raised when a two-letter code is not one of the 51 supported states
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown state code: {0:?}")]
pub struct UnknownStateCode(pub String);

/// US state (plus DC) as used by the Census place queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum StateCode {
    AL, AK, AZ, AR, CA, CO, CT, DE, DC, FL, GA, HI, ID,
    IL, IN, IA, KS, KY, LA, ME, MD, MA, MI, MN, MS, MO,
    MT, NE, NV, NH, NJ, NM, NY, NC, ND, OH, OK, OR, PA,
    RI, SC, SD, TN, TX, UT, VT, VA, WA, WV, WI, WY,
}

impl StateCode {
    /// All codes in FIPS order
    pub const ALL: [StateCode; 51] = [
        StateCode::AL, StateCode::AK, StateCode::AZ, StateCode::AR, StateCode::CA,
        StateCode::CO, StateCode::CT, StateCode::DE, StateCode::DC, StateCode::FL,
        StateCode::GA, StateCode::HI, StateCode::ID, StateCode::IL, StateCode::IN,
        StateCode::IA, StateCode::KS, StateCode::KY, StateCode::LA, StateCode::ME,
        StateCode::MD, StateCode::MA, StateCode::MI, StateCode::MN, StateCode::MS,
        StateCode::MO, StateCode::MT, StateCode::NE, StateCode::NV, StateCode::NH,
        StateCode::NJ, StateCode::NM, StateCode::NY, StateCode::NC, StateCode::ND,
        StateCode::OH, StateCode::OK, StateCode::OR, StateCode::PA, StateCode::RI,
        StateCode::SC, StateCode::SD, StateCode::TN, StateCode::TX, StateCode::UT,
        StateCode::VT, StateCode::VA, StateCode::WA, StateCode::WV, StateCode::WI,
        StateCode::WY,
    ];

    /// Two-letter postal abbreviation
    pub fn abbreviation(&self) -> &'static str {
        self.entry().0
    }

    /// Two-digit FIPS code used in the `in=state:` clause of Census queries
    pub fn fips(&self) -> &'static str {
        self.entry().1
    }

    fn entry(&self) -> (&'static str, &'static str) {
        match self {
            StateCode::AL => ("AL", "01"),
            StateCode::AK => ("AK", "02"),
            StateCode::AZ => ("AZ", "04"),
            StateCode::AR => ("AR", "05"),
            StateCode::CA => ("CA", "06"),
            StateCode::CO => ("CO", "08"),
            StateCode::CT => ("CT", "09"),
            StateCode::DE => ("DE", "10"),
            StateCode::DC => ("DC", "11"),
            StateCode::FL => ("FL", "12"),
            StateCode::GA => ("GA", "13"),
            StateCode::HI => ("HI", "15"),
            StateCode::ID => ("ID", "16"),
            StateCode::IL => ("IL", "17"),
            StateCode::IN => ("IN", "18"),
            StateCode::IA => ("IA", "19"),
            StateCode::KS => ("KS", "20"),
            StateCode::KY => ("KY", "21"),
            StateCode::LA => ("LA", "22"),
            StateCode::ME => ("ME", "23"),
            StateCode::MD => ("MD", "24"),
            StateCode::MA => ("MA", "25"),
            StateCode::MI => ("MI", "26"),
            StateCode::MN => ("MN", "27"),
            StateCode::MS => ("MS", "28"),
            StateCode::MO => ("MO", "29"),
            StateCode::MT => ("MT", "30"),
            StateCode::NE => ("NE", "31"),
            StateCode::NV => ("NV", "32"),
            StateCode::NH => ("NH", "33"),
            StateCode::NJ => ("NJ", "34"),
            StateCode::NM => ("NM", "35"),
            StateCode::NY => ("NY", "36"),
            StateCode::NC => ("NC", "37"),
            StateCode::ND => ("ND", "38"),
            StateCode::OH => ("OH", "39"),
            StateCode::OK => ("OK", "40"),
            StateCode::OR => ("OR", "41"),
            StateCode::PA => ("PA", "42"),
            StateCode::RI => ("RI", "44"),
            StateCode::SC => ("SC", "45"),
            StateCode::SD => ("SD", "46"),
            StateCode::TN => ("TN", "47"),
            StateCode::TX => ("TX", "48"),
            StateCode::UT => ("UT", "49"),
            StateCode::VT => ("VT", "50"),
            StateCode::VA => ("VA", "51"),
            StateCode::WA => ("WA", "53"),
            StateCode::WV => ("WV", "54"),
            StateCode::WI => ("WI", "55"),
            StateCode::WY => ("WY", "56"),
        }
    }
}

impl FromStr for StateCode {
    type Err = UnknownStateCode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        StateCode::ALL
            .iter()
            .copied()
            .find(|code| code.abbreviation().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownStateCode(s.to_string()))
    }
}

impl fmt::Display for StateCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.abbreviation())
    }
}
