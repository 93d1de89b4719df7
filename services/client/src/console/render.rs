//! services/client/src/console/render.rs
//!
//! Plain-text rendering of orchestrator state for the terminal.

use std::fmt::Write;

use legal_assistant_core::domain::{Message, Role};
use legal_assistant_core::domains::{self, Domain};
use legal_assistant_core::{ChatStats, DocumentStats, HealthView};

/// Human-readable size, in steps of 1024.
pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    let rounded = format!("{:.2}", value);
    let trimmed = rounded.trim_end_matches('0').trim_end_matches('.');
    format!("{} {}", trimmed, UNITS[unit])
}

/// Groups digits the Indian way: the last three, then pairs (`12,34,567`).
pub fn format_number(n: u64) -> String {
    let digits = n.to_string();
    if digits.len() <= 3 {
        return digits;
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();
    format!("{},{}", groups.join(","), tail)
}

pub fn message(message: &Message) -> String {
    let speaker = match message.role {
        Role::User => "you",
        Role::Assistant => "vera",
    };
    let mut out = format!(
        "[{}] {}: {}",
        message.timestamp.format("%H:%M"),
        speaker,
        message.content
    );
    if let Some(citations) = message.citations.as_ref().filter(|c| !c.is_empty()) {
        out.push_str("\n  sources:");
        for citation in citations {
            let _ = write!(out, "\n    - {}", citation.act);
            if let Some(section) = &citation.section {
                let _ = write!(out, ", section {}", section);
            }
            if let Some(page) = citation.page {
                let _ = write!(out, " (p. {})", page);
            }
        }
    }
    if let Some(meta) = &message.metadata {
        let _ = write!(
            out,
            "\n  [{} chunks · {} · {}]",
            meta.retrieved_chunks, meta.generation_model, meta.vector_store
        );
    }
    out
}

pub fn domain_list(selected: &Domain) -> String {
    domains::list()
        .iter()
        .map(|domain| {
            let marker = if domain.value == selected.value { '*' } else { ' ' };
            format!(
                "{} {:<15} {} - {}",
                marker, domain.value, domain.label, domain.description
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn chat_stats(stats: &ChatStats) -> String {
    if !stats.has_messages {
        return "No messages yet.".to_string();
    }
    format!(
        "{} messages ({} from you, {} from the assistant)",
        stats.total_messages, stats.user_messages, stats.assistant_messages
    )
}

pub fn document_stats(stats: &DocumentStats) -> String {
    let mut out = format!(
        "{} documents, {} vectors",
        format_number(stats.total_documents as u64),
        format_number(stats.total_vectors)
    );
    for (domain, count) in &stats.domain_stats {
        let _ = write!(out, "\n  {:<15} {}", domains::label_for(domain), count);
    }
    for document in &stats.documents {
        let indexed = document
            .indexed_at
            .map(|t| t.format("%d %b %Y, %H:%M").to_string())
            .unwrap_or_else(|| "Never".to_string());
        let _ = write!(
            out,
            "\n  - {} ({} vectors, indexed {})",
            document.collection,
            format_number(document.vector_count),
            indexed
        );
    }
    out
}

pub fn health(view: &HealthView) -> String {
    let record = &view.record;
    let mut out = format!(
        "Backend {}: {}",
        record.status.as_str(),
        record.message.as_deref().unwrap_or_default()
    );
    if let Some(version) = &record.version {
        let _ = write!(out, " (v{})", version);
    }
    if let Some(uptime) = record.uptime_seconds {
        let _ = write!(out, ", up {}s", format_number(uptime));
    }
    out
}
