use std::fmt;
use std::str::FromStr;

/// Health measures that can be looked up. Labels match the `Measure_name` column exactly.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Measure {
    ViolentCrimeRate,
    Unemployment,
    ChildrenInPoverty,
    DiabeticScreening,
    MammographyScreening,
    PreventableHospitalStays,
    Uninsured,
    SexuallyTransmittedInfections,
    PhysicalInactivity,
    AdultObesity,
    PrematureDeath,
    DailyFineParticulateMatter,
}

impl Measure {
    pub const ALL: [Measure; 12] = [
        Measure::ViolentCrimeRate,
        Measure::Unemployment,
        Measure::ChildrenInPoverty,
        Measure::DiabeticScreening,
        Measure::MammographyScreening,
        Measure::PreventableHospitalStays,
        Measure::Uninsured,
        Measure::SexuallyTransmittedInfections,
        Measure::PhysicalInactivity,
        Measure::AdultObesity,
        Measure::PrematureDeath,
        Measure::DailyFineParticulateMatter,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Measure::ViolentCrimeRate => "Violent crime rate",
            Measure::Unemployment => "Unemployment",
            Measure::ChildrenInPoverty => "Children in poverty",
            Measure::DiabeticScreening => "Diabetic screening",
            Measure::MammographyScreening => "Mammography screening",
            Measure::PreventableHospitalStays => "Preventable hospital stays",
            Measure::Uninsured => "Uninsured",
            Measure::SexuallyTransmittedInfections => "Sexually transmitted infections",
            Measure::PhysicalInactivity => "Physical inactivity",
            Measure::AdultObesity => "Adult obesity",
            Measure::PrematureDeath => "Premature Death",
            Measure::DailyFineParticulateMatter => "Daily fine particulate matter",
        }
    }

    pub fn labels() -> Vec<&'static str> {
        Self::ALL.iter().map(|m| m.as_str()).collect()
    }
}

impl fmt::Display for Measure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Exact, case-sensitive match against the labels.
impl FromStr for Measure {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL.iter().copied().find(|m| m.as_str() == s).ok_or(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_label_parses_back() {
        for m in Measure::ALL {
            assert_eq!(m.as_str().parse::<Measure>(), Ok(m));
        }
    }

    #[test]
    fn match_is_exact() {
        assert!("Unemploymant".parse::<Measure>().is_err());
        assert!("adult obesity".parse::<Measure>().is_err());
        assert!("Premature death".parse::<Measure>().is_err());
        assert!(" Uninsured".parse::<Measure>().is_err());
    }
}
