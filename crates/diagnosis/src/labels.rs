use std::fmt;

/// The three organ classes this system distinguishes.
///
/// Discriminant order matches the body-part classifier's output vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyPart {
    Elbow,
    Hand,
    Shoulder,
}

impl BodyPart {
    /// Fixed enumeration order. Fracture re-checks iterate this list, and
    /// confidence ties resolve to the first part encountered.
    pub const ALL: [BodyPart; 3] = [BodyPart::Elbow, BodyPart::Hand, BodyPart::Shoulder];

    pub fn as_str(&self) -> &'static str {
        match self {
            BodyPart::Elbow => "Elbow",
            BodyPart::Hand => "Hand",
            BodyPart::Shoulder => "Shoulder",
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(BodyPart::Elbow),
            1 => Some(BodyPart::Hand),
            2 => Some(BodyPart::Shoulder),
            _ => None,
        }
    }
}

impl fmt::Display for BodyPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Binary fracture label.
///
/// Index order matches the fracture classifiers' output vector:
/// fractured = 0, normal = 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FractureStatus {
    Fractured,
    Normal,
}

impl FractureStatus {
    pub fn index(&self) -> usize {
        match self {
            FractureStatus::Fractured => 0,
            FractureStatus::Normal => 1,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(FractureStatus::Fractured),
            1 => Some(FractureStatus::Normal),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FractureStatus::Fractured => "fractured",
            FractureStatus::Normal => "normal",
        }
    }
}

/// Names one of the four classifiers the registry serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelKey {
    /// The 3-class body-part classifier.
    Parts,
    /// The 2-class fracture classifier dedicated to one body part.
    Fracture(BodyPart),
}

impl ModelKey {
    /// Public lookup names, in registry order.
    pub const NAMES: [&'static str; 4] = ["Parts", "Elbow", "Hand", "Shoulder"];

    pub fn name(&self) -> &'static str {
        match self {
            ModelKey::Parts => "Parts",
            ModelKey::Fracture(part) => part.as_str(),
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Parts" => Some(ModelKey::Parts),
            "Elbow" => Some(ModelKey::Fracture(BodyPart::Elbow)),
            "Hand" => Some(ModelKey::Fracture(BodyPart::Hand)),
            "Shoulder" => Some(ModelKey::Fracture(BodyPart::Shoulder)),
            _ => None,
        }
    }

    /// Number of classes in this classifier's output vector.
    pub fn class_count(&self) -> usize {
        match self {
            ModelKey::Parts => BodyPart::ALL.len(),
            ModelKey::Fracture(_) => 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enumeration_order_is_elbow_hand_shoulder() {
        assert_eq!(
            BodyPart::ALL,
            [BodyPart::Elbow, BodyPart::Hand, BodyPart::Shoulder]
        );
    }

    #[test]
    fn test_body_part_index_roundtrip() {
        for (index, part) in BodyPart::ALL.iter().enumerate() {
            assert_eq!(BodyPart::from_index(index), Some(*part));
        }
        assert_eq!(BodyPart::from_index(3), None);
    }

    #[test]
    fn test_fracture_status_index_order() {
        assert_eq!(FractureStatus::from_index(0), Some(FractureStatus::Fractured));
        assert_eq!(FractureStatus::from_index(1), Some(FractureStatus::Normal));
        assert_eq!(FractureStatus::from_index(2), None);
        assert_eq!(FractureStatus::Fractured.index(), 0);
    }

    #[test]
    fn test_model_key_name_roundtrip() {
        for name in ModelKey::NAMES {
            let key = ModelKey::from_name(name).expect("every public name resolves");
            assert_eq!(key.name(), name);
        }
        assert_eq!(ModelKey::from_name("Knee"), None);
        assert_eq!(ModelKey::from_name("parts"), None, "names are case-sensitive");
    }

    #[test]
    fn test_class_counts_match_label_sets() {
        assert_eq!(ModelKey::Parts.class_count(), 3);
        assert_eq!(ModelKey::Fracture(BodyPart::Hand).class_count(), 2);
    }
}
