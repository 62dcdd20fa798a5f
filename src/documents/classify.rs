use crate::model::DocumentType;

/// Derive the document type from a file name.
///
/// Case-sensitive substring match, checked in order: `license`, `insurance`,
/// `id`. The first hit wins; anything else is [`DocumentType::Other`].
pub fn classify(filename: &str) -> DocumentType {
    const RULES: [(&str, DocumentType); 3] = [
        ("license", DocumentType::License),
        ("insurance", DocumentType::Insurance),
        ("id", DocumentType::Id),
    ];

    RULES
        .iter()
        .find(|(needle, _)| filename.contains(needle))
        .map_or(DocumentType::Other, |(_, kind)| *kind)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_license_takes_precedence() {
        assert_eq!(classify("business-license.pdf"), DocumentType::License);
        assert_eq!(classify("license-and-insurance.pdf"), DocumentType::License);
        assert_eq!(classify("insurance_license_id.png"), DocumentType::License);
    }

    #[test]
    fn test_insurance_before_id() {
        assert_eq!(classify("insurance-id-card.jpg"), DocumentType::Insurance);
    }

    #[test]
    fn test_id_substring() {
        assert_eq!(classify("drivers-id.png"), DocumentType::Id);
        // Substring match, so "video" counts too.
        assert_eq!(classify("video-still.png"), DocumentType::Id);
    }

    #[test]
    fn test_match_is_case_sensitive() {
        assert_eq!(classify("LICENSE.pdf"), DocumentType::Other);
        assert_eq!(classify("Insurance.pdf"), DocumentType::Other);
        assert_eq!(classify("ID.png"), DocumentType::Other);
    }

    #[test]
    fn test_everything_else_is_other() {
        assert_eq!(classify("photo.png"), DocumentType::Other);
        assert_eq!(classify("certificate.pdf"), DocumentType::Other);
        assert_eq!(classify(""), DocumentType::Other);
    }
}
