// Serialization of match results
use super::*;

#[test]
fn test_match_result_to_json() {
    let pattern = compile(r"(?<word>\w+)", "");
    let m = pattern.find("hi").unwrap().unwrap();
    let json = serde_json::to_value(&m).unwrap();
    assert_eq!(json["whole"]["text"], "hi");
    assert_eq!(json["groups"][0]["name"], "word");
    assert_eq!(json["groups"][0]["end"], 2);
}
