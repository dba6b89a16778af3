/// A student taking part in the timetable.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct StudentProfile {
    pub id: usize,
    /// One flag per slot; `true` if the student can attend.
    pub availability: Vec<bool>,
    /// Reward earned for every class placed for this student.
    pub preference: f64,
}

impl StudentProfile {
    pub fn new(id: usize, availability: Vec<bool>, preference: f64) -> Self {
        Self {
            id,
            availability,
            preference,
        }
    }

    pub fn is_available(&self, slot: usize) -> bool {
        self.availability.get(slot).copied().unwrap_or(false)
    }

    pub fn num_slots(&self) -> usize {
        self.availability.len()
    }
}

/// Splits profiles into the preference and availability tables the
/// fitness function consumes, indexed by row.
pub fn split_profiles(profiles: &[StudentProfile]) -> (Vec<f64>, Vec<Vec<bool>>) {
    profiles
        .iter()
        .map(|profile| (profile.preference, profile.availability.clone()))
        .unzip()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_availability_lookup() {
        let student = StudentProfile::new(0, vec![true, false], 1.2);
        assert!(student.is_available(0));
        assert!(!student.is_available(1));
        assert!(!student.is_available(2));
        assert_eq!(student.num_slots(), 2);
    }

    #[test]
    fn test_split_profiles() {
        let profiles = vec![
            StudentProfile::new(0, vec![true], 0.5),
            StudentProfile::new(1, vec![false], 1.5),
        ];
        let (preferences, availability) = split_profiles(&profiles);
        assert_eq!(preferences, vec![0.5, 1.5]);
        assert_eq!(availability, vec![vec![true], vec![false]]);
    }
}
