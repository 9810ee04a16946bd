
#[cfg(test)]
mod tests {
    use super::fixtures::*;

    #[test]
    fn test_well_formed_reply_is_valid_json() {
        let parsed: serde_json::Value =
            serde_json::from_str(WELL_FORMED_REPLY).expect("fixture should be valid JSON");
        assert!(parsed.is_array());
    }

    #[test]
    fn test_fenced_reply_wraps_fixture() {
        let fenced = fenced_reply();
        assert!(fenced.starts_with("```json"));
        assert!(fenced.ends_with("```"));
    }

    #[test]
    fn test_generate_request_fixture() {
        let request = generate_request("Photosynthesis", 3);
        assert_eq!(request.topic, "Photosynthesis");
        assert_eq!(request.num_cards, 3);
    }
}
