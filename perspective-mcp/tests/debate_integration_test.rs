//! Debate integration test: drives full debates through the panel session
//! for every supported participant count.
//!
//! Covers: round rotation ↔ round completion ↔ attribution ↔ constraints ↔
//! summary running together in a single pass.

use perspective_mcp::debate::{MAX_ROUNDS, MAX_PARTICIPANTS, MIN_PARTICIPANTS};
use perspective_mcp::{PanelSession, Perspective};

fn panel() -> Vec<Perspective> {
    vec![
        Perspective::new("Economist", &["markets", "incentives"], "Pragmatic"),
        Perspective::new("Ethicist", &["fairness", "harm"], "Principled"),
        Perspective::new("Engineer", &["feasibility"], "Skeptical"),
        Perspective::new("Lawyer", &["liability"], "Careful"),
        Perspective::new("Historian", &["precedent"], "Reflective"),
    ]
}

fn roles(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

fn session_with_debate(names: &[&str]) -> PanelSession {
    let mut session = PanelSession::new();
    session.define_perspectives(panel()).unwrap();
    session.start_debate("Carbon tax", &roles(names)).unwrap();
    session
}

// ── Participant bounds ─────────────────────────────────────────────

#[test]
fn test_participant_count_bounds() {
    let mut session = PanelSession::new();
    session.define_perspectives(panel()).unwrap();

    let err = session.start_debate("t", &roles(&["Economist"])).unwrap_err();
    assert!(err.is_invalid_input());

    let err = session
        .start_debate(
            "t",
            &roles(&["Economist", "Ethicist", "Engineer", "Lawyer", "Historian"]),
        )
        .unwrap_err();
    assert!(err.is_invalid_input());

    for n in MIN_PARTICIPANTS..=MAX_PARTICIPANTS {
        let names: Vec<String> = panel().iter().take(n).map(|p| p.role.clone()).collect();
        let first = session.start_debate("t", &names).unwrap();
        assert_eq!(first, names[0]);
        assert_eq!(
            session.debate().current_speaker().unwrap().role,
            names[0]
        );
    }
}

// ── Round progression for P = 2, 3, 4 ──────────────────────────────

#[test]
fn test_round_progression_for_every_size() {
    let all = ["Economist", "Ethicist", "Engineer", "Lawyer"];

    for p in MIN_PARTICIPANTS..=MAX_PARTICIPANTS {
        let mut session = session_with_debate(&all[..p]);
        let mut completed_on = Vec::new();

        for turn in 1..=(MAX_ROUNDS as usize * p) {
            let outcome = session
                .record_turn(&format!("statement {}", turn), true)
                .unwrap();
            assert_eq!(outcome.participant, all[(turn - 1) % p]);

            if outcome.is_round_complete {
                completed_on.push(turn);
            }
            if turn % p == 0 {
                let k = (turn / p) as u32;
                assert_eq!(outcome.round, (1 + k).min(MAX_ROUNDS), "P={} turn={}", p, turn);
            }
            let expect_more = turn < MAX_ROUNDS as usize * p;
            assert_eq!(outcome.next_participant_needed, expect_more);
        }

        assert_eq!(completed_on, vec![p, 2 * p, 3 * p], "P={}", p);
        assert!(session.debate().is_active());
        assert_eq!(session.debate().current_round(), MAX_ROUNDS);
    }
}

#[test]
fn test_turns_after_completion_still_append() {
    let mut session = session_with_debate(&["Economist", "Ethicist", "Engineer"]);
    for i in 0..9 {
        session.record_turn(&format!("s{}", i), true).unwrap();
    }

    let extra = session.record_turn("encore", true).unwrap();
    assert_eq!(extra.participant, "Economist");
    assert_eq!(extra.round, 3);
    assert!(extra.next_participant_needed);
    assert_eq!(session.debate_snapshot().history.len(), 10);

    // Wrapping back to a multiple of P closes round 3 again.
    session.record_turn("encore 2", true).unwrap();
    let again = session.record_turn("encore 3", true).unwrap();
    assert!(again.is_round_complete);
    assert!(!again.next_participant_needed);
}

// ── Attribution ────────────────────────────────────────────────────

#[test]
fn test_two_party_example() {
    let mut session = session_with_debate(&["Economist", "Ethicist"]);

    let t1 = session.record_turn("Prices signal scarcity", true).unwrap();
    assert_eq!(t1.round, 1);
    assert!(!t1.is_round_complete);

    let t2 = session.record_turn("Burdens fall on the poor", true).unwrap();
    assert_eq!(t2.participant, "Ethicist");
    assert_eq!(t2.round, 2);
    assert!(t2.is_round_complete);

    let t3 = session.record_turn("Rebates fix that", true).unwrap();
    assert_eq!(t3.participant, "Economist");
    assert_eq!(t3.responding_to.as_deref(), Some("Ethicist"));

    let t4 = session.record_turn("Only partly", true).unwrap();
    assert_eq!(t4.responding_to.as_deref(), Some("Economist"));
}

#[test]
fn test_four_party_attribution_is_first_other_speaker() {
    let mut session = session_with_debate(&["Lawyer", "Engineer", "Ethicist", "Economist"]);
    for s in ["l1", "g1", "x1", "e1"] {
        session.record_turn(s, true).unwrap();
    }

    let mut targets = Vec::new();
    for s in ["l2", "g2", "x2", "e2"] {
        targets.push(session.record_turn(s, true).unwrap().responding_to);
    }
    assert_eq!(
        targets,
        vec![
            Some("Engineer".to_string()),
            Some("Lawyer".to_string()),
            Some("Lawyer".to_string()),
            Some("Lawyer".to_string()),
        ]
    );

    // Round 3 looks only at round 2.
    let r3 = session.record_turn("l3", true).unwrap();
    assert_eq!(r3.responding_to.as_deref(), Some("Engineer"));
}

#[test]
fn test_non_advancing_turns_feed_attribution() {
    let mut session = session_with_debate(&["Economist", "Ethicist"]);
    session.record_turn("e draft", false).unwrap();
    session.record_turn("e final", true).unwrap();
    session.record_turn("x1", true).unwrap();

    let snapshot = session.debate_snapshot();
    assert_eq!(snapshot.previous_round_statements.len(), 3);

    let t = session.record_turn("e2", true).unwrap();
    assert_eq!(t.responding_to.as_deref(), Some("Ethicist"));
}

// ── Constraints & summary ──────────────────────────────────────────

#[test]
fn test_constraints_before_and_after_start() {
    let mut session = PanelSession::new();
    session.define_perspectives(panel()).unwrap();
    assert!(session.add_constraint("budget").unwrap_err().is_precondition());

    session
        .start_debate("t", &roles(&["Economist", "Ethicist"]))
        .unwrap();
    let constraints = ["budget is fixed", "rollout by 2030", "budget is fixed"];
    for (i, c) in constraints.iter().enumerate() {
        assert_eq!(session.add_constraint(c).unwrap(), i + 1);
    }
    assert_eq!(session.debate_snapshot().constraints, constraints.to_vec());
}

#[test]
fn test_summary_totals_match_history() {
    let mut session = PanelSession::new();
    session.define_perspectives(panel()).unwrap();
    assert!(session.summarize_debate().unwrap_err().is_precondition());

    session
        .start_debate("t", &roles(&["Economist", "Ethicist", "Engineer"]))
        .unwrap();
    session.record_turn("a", true).unwrap();
    session.record_turn("b", false).unwrap();
    session.record_turn("c", true).unwrap();
    session.record_turn("d", true).unwrap();
    session.add_constraint("no new taxes").unwrap();

    let summary = session.summarize_debate().unwrap();
    let total: usize = summary.key_points.values().map(Vec::len).sum();
    assert_eq!(total, session.debate_snapshot().history.len());
    assert_eq!(summary.total_turns, 4);
    assert_eq!(summary.key_points["Ethicist"], vec!["b", "c"]);
    assert_eq!(summary.rounds, 2);
    assert_eq!(summary.constraints, vec!["no new taxes"]);
}

#[test]
fn test_new_debate_discards_old_transcript() {
    let mut session = session_with_debate(&["Economist", "Ethicist"]);
    session.record_turn("a", true).unwrap();
    session.add_constraint("c").unwrap();

    session
        .start_debate("Second topic", &roles(&["Historian", "Lawyer"]))
        .unwrap();
    let summary = session.summarize_debate().unwrap();
    assert_eq!(summary.topic, "Second topic");
    assert_eq!(summary.total_turns, 0);
    assert!(summary.constraints.is_empty());
    assert_eq!(summary.participants, vec!["Historian", "Lawyer"]);
}
