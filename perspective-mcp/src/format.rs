//! Text replies for the MCP tools.

use crate::debate::{round_label, DebateSummary};
use crate::tools::{
    AnalysisResponse, DebateTurnResponse, InjectConstraintResponse, SetPerspectivesResponse,
    StartDebateResponse,
};

/// Cut `text` to at most `max_chars` characters, appending `...` when cut.
pub fn excerpt(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}

pub fn set_perspectives(resp: &SetPerspectivesResponse) -> String {
    format!(
        "Successfully set {} perspectives. Starting with: {}",
        resp.count, resp.first_role
    )
}

pub fn analysis(resp: &AnalysisResponse) -> String {
    let mut out = format!(
        "Analysis recorded for {}.\nProgress: {}/{} perspectives completed.\n",
        resp.recorded_role, resp.completed, resp.total
    );

    match (&resp.next_perspective, resp.next_perspective_needed) {
        (Some(next), true) => out.push_str(&format!(
            "\nNext perspective: {}\nFocus areas: {}\nPersonality: {}",
            next.role,
            next.focus_line(),
            next.personality
        )),
        _ => out.push_str(&format!(
            "\nAll perspectives completed. Total analyses: {}",
            resp.completed
        )),
    }
    out
}

pub fn start_debate(resp: &StartDebateResponse) -> String {
    let participants: Vec<String> = resp
        .participants
        .iter()
        .enumerate()
        .map(|(i, p)| format!("{}. {}", i + 1, p))
        .collect();

    format!(
        "Debate started on topic: \"{}\"\n\nParticipants:\n{}\n\nRound 1: {}\nCurrent speaker: {}",
        resp.topic,
        participants.join("\n"),
        round_label(1),
        resp.current_speaker
    )
}

pub fn debate_turn(resp: &DebateTurnResponse) -> String {
    let outcome = &resp.outcome;
    let mut out = format!("Statement recorded for {}.\n", outcome.participant);

    if outcome.is_round_complete && outcome.next_participant_needed {
        out.push_str(&format!(
            "\nRound {} complete. Starting Round {}.\n",
            outcome.round - 1,
            outcome.round
        ));
        match outcome.round {
            2 => out.push_str("Participants will now respond to conflicting viewpoints.\n"),
            3 => out.push_str("Final round: Synthesis and compromise proposals.\n"),
            _ => {}
        }
    }

    if !outcome.next_participant_needed {
        out.push_str(&format!("\nDebate complete after {} turns.", resp.total_turns));
    } else if let Some(next) = &resp.next_speaker {
        out.push_str(&format!("\nNext speaker: {}", next));
        if let Some(target) = &resp.next_responds_to {
            out.push_str(&format!(" (responding to {})", target));
        }
    }
    out
}

pub fn constraint(resp: &InjectConstraintResponse) -> String {
    let reminder = match &resp.current_speaker {
        Some(speaker) => format!(
            "Current speaker ({}) should consider this in their response.",
            speaker
        ),
        None => "Current speaker should consider this in their response.".to_string(),
    };
    format!(
        "New constraint added: \"{}\"\n\nTotal constraints: {}\n{}",
        resp.constraint, resp.total_constraints, reminder
    )
}

/// Markdown summary with statements cut to `excerpt_chars`.
pub fn summary(summary: &DebateSummary, excerpt_chars: usize) -> String {
    let mut out = String::from("## Debate Summary\n\n");
    out.push_str(&format!("**Topic:** {}\n\n", summary.topic));
    out.push_str(&format!(
        "**Participants:** {}\n\n",
        summary.participants.join(", ")
    ));
    out.push_str(&format!(
        "**Duration:** {} rounds, {} total statements\n\n",
        summary.rounds, summary.total_turns
    ));

    if !summary.constraints.is_empty() {
        out.push_str("**Constraints Added:**\n");
        for (i, c) in summary.constraints.iter().enumerate() {
            out.push_str(&format!("{}. {}\n", i + 1, c));
        }
        out.push('\n');
    }

    out.push_str("**Key Points by Participant:**\n");
    for (participant, points) in &summary.key_points {
        out.push_str(&format!("\n### {}\n", participant));
        // Numbered by position; uneven when turns were recorded without advancing.
        for (i, point) in points.iter().enumerate() {
            out.push_str(&format!("Round {}: {}\n", i + 1, excerpt(point, excerpt_chars)));
        }
    }
    out
}
