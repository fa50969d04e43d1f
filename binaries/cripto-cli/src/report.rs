//! Terminal rendering for attack results.
//!
//! Every function returns the text to print so the layout can be tested.

use cripto_attack::{CaesarReport, Dictionary, DictionaryOrigin, RemoteRanking, XorFindings};
use cripto_core::candidate::{preview, PREVIEW_CHARS};
use cripto_core::{Candidate, ScoredCandidate};

/// Remote rankings show shorter text than local ones.
pub const REMOTE_PREVIEW_CHARS: usize = 50;

const TOP_N: usize = cripto_attack::caesar::TOP_N;

fn header(title: &str) -> Vec<String> {
    vec![
        String::new(),
        format!("  {}", title),
        format!("  {}", "=".repeat(title.len())),
        String::new(),
    ]
}

/// Every shift and its decoding.
pub fn caesar_listing(ciphertext: &str, candidates: &[Candidate<u8>]) -> String {
    let mut lines = header("CAESAR BRUTEFORCE");
    lines.push(format!("  Ciphertext: {}", ciphertext));
    lines.push(String::new());

    for candidate in candidates {
        lines.push(format!("  [{:2}] {}", candidate.key, candidate.text));
    }
    lines.join("\n")
}

pub fn caesar_report(ciphertext: &str, report: &CaesarReport) -> String {
    let mut lines = header("CAESAR KEY RECOVERY");
    lines.push(format!("  Ciphertext: {}", ciphertext));
    lines.push(format!("  Best key:   {}", report.best_key));
    if let Some(plaintext) = report.best_plaintext() {
        lines.push(format!("  Plaintext:  {}", plaintext));
    }

    lines.push(String::new());
    lines.push(format!("  LOCAL TOP {}:", TOP_N));
    lines.extend(ranked_lines(report.local_top(), PREVIEW_CHARS));

    match &report.remote {
        RemoteRanking::NotRequested => {}
        RemoteRanking::Unavailable { reason } => {
            lines.push(String::new());
            lines.push("  REMOTE: requested but unavailable, local ranking only".to_string());
            lines.push(format!("    {}", reason));
        }
        RemoteRanking::Scored(outcome) => {
            let top = outcome.top(TOP_N);
            lines.push(String::new());
            lines.push(format!("  REMOTE TOP {} (congruence):", TOP_N));
            if top.is_empty() {
                lines.push("    No candidate could be scored.".to_string());
            } else {
                lines.extend(ranked_lines(top, REMOTE_PREVIEW_CHARS));
            }
            if top.len() < TOP_N {
                lines.push(format!(
                    "    Only {} of {} candidates were scored.",
                    outcome.ranked.len(),
                    outcome.attempted()
                ));
            }
            for failure in &outcome.failures {
                lines.push(format!("    [{:2}] failed: {}", failure.key, failure.error));
            }
        }
    }

    lines.join("\n")
}

fn ranked_lines(ranked: &[ScoredCandidate<u8>], max_chars: usize) -> Vec<String> {
    ranked
        .iter()
        .map(|c| format!("    [{:2}] {:>8.2}  {}", c.key, c.score, c.preview(max_chars)))
        .collect()
}

/// `61 62 63 (abc)`, with `.` standing in for non-printable bytes.
pub fn key_display(key: &[u8]) -> String {
    let printable: String = key
        .iter()
        .map(|b| if b.is_ascii_graphic() || *b == b' ' { *b as char } else { '.' })
        .collect();
    format!("{} ({})", cripto_core::hex::to_spaced(key), printable)
}

pub fn dictionary_note(dictionary: &Dictionary) -> String {
    match dictionary.origin() {
        DictionaryOrigin::File(path) => format!("  Dictionary: {} ({} keys)", path.display(), dictionary.len()),
        DictionaryOrigin::Inline => format!("  Dictionary: {} inline keys", dictionary.len()),
        DictionaryOrigin::Fallback => format!("  Dictionary: built-in fallback ({} keys)", dictionary.len()),
    }
}

pub fn xor_findings(findings: &XorFindings) -> String {
    let title = format!("XOR {} SEARCH", findings.strategy.to_uppercase());
    let mut lines = header(&title);
    lines.push(format!("  Keys tried: {}", findings.keys_tried));

    if findings.candidates.is_empty() {
        lines.push(format!("  No readable candidates for the {} search.", findings.strategy));
        return lines.join("\n");
    }

    lines.push(format!("  Readable candidates: {}", findings.candidates.len()));
    lines.push(String::new());
    for candidate in &findings.candidates {
        lines.push(format!("    key {}", key_display(&candidate.key)));
        lines.push(format!("      {}", preview(&candidate.text(), PREVIEW_CHARS)));
    }
    lines.join("\n")
}
