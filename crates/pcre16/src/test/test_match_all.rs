// Tests for iterative matching
use rand::Rng;

use super::*;
use crate::PcreError;

#[test]
fn test_words() {
    let pattern = compile(r"f\w+", "");
    let words: Vec<_> = pattern
        .match_all("fe fi fo fum")
        .unwrap()
        .into_iter()
        .map(|m| m[0].text.clone())
        .collect();
    assert_eq!(words, vec!["fe", "fi", "fo", "fum"]);
}

#[test]
fn test_no_matches() {
    let pattern = compile("z", "");
    assert!(pattern.match_all("abc").unwrap().is_empty());
    assert!(pattern.match_all("").unwrap().is_empty());
}

#[test]
fn test_empty_matches_advance() {
    let pattern = compile("x*", "");
    let starts: Vec<_> = pattern
        .match_all("abc")
        .unwrap()
        .iter()
        .map(|m| m.start())
        .collect();
    assert_eq!(starts, vec![0, 1, 2]);
}

#[test]
fn test_empty_match_steps_over_surrogate_pair() {
    let pattern = compile("", "");
    let starts: Vec<_> = pattern
        .match_all("\u{1F600}a")
        .unwrap()
        .iter()
        .map(|m| m.start())
        .collect();
    assert_eq!(starts, vec![0, 2]);
}

#[test]
fn test_iteration_ceiling() {
    let limits = Limits {
        max_match_iterations: 5,
        ..Limits::default()
    };
    let pattern = engine_with(limits).compile("a", "").unwrap();
    assert_eq!(pattern.match_all("aaaaa").unwrap().len(), 5);
    assert_eq!(
        pattern.match_all("aaaaaa").unwrap_err(),
        PcreError::IterationLimit { limit: 5 }
    );
}

#[test]
fn test_default_ceiling() {
    let pattern = compile("a", "");
    assert_eq!(pattern.match_all(&"a".repeat(1000)).unwrap().len(), 1000);
    assert!(matches!(
        pattern.match_all(&"a".repeat(1001)),
        Err(PcreError::IterationLimit { limit: 1000 })
    ));
}

#[test]
fn test_random_subjects_are_ordered_and_disjoint() {
    let mut rng = rand::thread_rng();
    let pattern = compile("ab*|c", "");
    for _ in 0..50 {
        let len = rng.gen_range(0..200);
        let subject: String = (0..len)
            .map(|_| ['a', 'b', 'c', 'd'][rng.gen_range(0..4)])
            .collect();

        let matches = pattern.match_all(&subject).unwrap();
        let expected = subject.matches('a').count() + subject.matches('c').count();
        assert_eq!(matches.len(), expected, "{}", subject);

        let mut last_end = 0;
        for m in &matches {
            assert!(m.start() >= last_end, "{}", subject);
            assert!(m.end() > m.start());
            assert_eq!(&subject[m.start()..m.end()], m[0].text);
            last_end = m.end();
        }
    }
}
