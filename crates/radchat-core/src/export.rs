//! Case export and report formatting.
//!
//! JSON export is the record verbatim, pretty-printed. The report form
//! is a fixed plain-text layout with a disclaimer footer, suitable for
//! a text download.

use chrono::{SecondsFormat, Utc};
use radchat_types::case::{RadiologyCase, RadiologyModality};
use radchat_types::message::{Message, Role};
use radchat_types::prompt::MEDICAL_DISCLAIMER;
use radchat_types::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Report,
}

/// Render a case in the requested export format
pub fn export_case(case: &RadiologyCase, format: ExportFormat) -> Result<String> {
    match format {
        ExportFormat::Json => Ok(serde_json::to_string_pretty(case)?),
        ExportFormat::Report => Ok(generate_case_report(case)),
    }
}

/// Download file name for an export: the title lowercased with every
/// non-alphanumeric run replaced by underscores.
pub fn export_file_name(case: &RadiologyCase, format: ExportFormat) -> String {
    let stem: String = case
        .title
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '_' })
        .collect();
    match format {
        ExportFormat::Json => format!("{}.json", stem),
        ExportFormat::Report => format!("{}_report.txt", stem),
    }
}

/// Fixed-layout plain-text case report
pub fn generate_case_report(case: &RadiologyCase) -> String {
    let patient_id = case.patient_id.as_deref().filter(|s| !s.is_empty());
    let findings = if case.findings.is_empty() {
        "No findings recorded"
    } else {
        &case.findings
    };
    let impression = if case.impression.is_empty() {
        "No impression recorded"
    } else {
        &case.impression
    };

    format!(
        "\nRADIOLOGY CASE REPORT\n\
         =====================\n\
         \n\
         Case ID: {id}\n\
         Patient ID: {patient}\n\
         Date Created: {created_local}\n\
         Status: {status}\n\
         \n\
         CASE DETAILS\n\
         ------------\n\
         Title: {title}\n\
         Modality: {modality}\n\
         \n\
         Description:\n\
         {description}\n\
         \n\
         FINDINGS\n\
         --------\n\
         {findings}\n\
         \n\
         IMPRESSION\n\
         ----------\n\
         {impression}\n\
         \n\
         IMAGES\n\
         ------\n\
         {image_count} image(s) associated with this case\n\
         \n\
         METADATA\n\
         --------\n\
         Created: {created}\n\
         Last Updated: {updated}\n\
         Chat Session ID: {session}\n\
         \n\
         ---\n\
         Report generated by AI Radiology Chat App\n\
         Generated on: {now}\n\
         \n\
         {disclaimer}\n",
        id = case.id,
        patient = patient_id.unwrap_or("Not specified"),
        created_local = case.created_at.format("%Y-%m-%d %H:%M:%S"),
        status = case.status.label(),
        title = case.title,
        modality = case.modality.short_label(),
        description = case.description,
        findings = findings,
        impression = impression,
        image_count = case.images.len(),
        created = case.created_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        updated = case.updated_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        session = case.chat_session_id,
        now = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        disclaimer = MEDICAL_DISCLAIMER,
    )
}

/// Suggested case title: modality tag plus the leading 50 characters
/// of the description.
pub fn generate_case_title(modality: RadiologyModality, description: &str) -> String {
    let short: String = description.chars().take(50).collect();
    if description.chars().count() > 50 {
        format!("{} - {}...", modality.short_label(), short)
    } else {
        format!("{} - {}", modality.short_label(), short)
    }
}

/// One-line transcript rendering of a message
pub fn format_message_for_display(message: &Message) -> String {
    let speaker = if message.role == Role::User {
        "You"
    } else {
        "AI Assistant"
    };
    format!(
        "[{}] {}: {}",
        message.timestamp.format("%Y-%m-%d %H:%M:%S"),
        speaker,
        message.content
    )
}

/// Strip obvious identifiers from free text before it leaves the app:
/// SSN-shaped number groups and digit runs of ten or more.
pub fn sanitize_patient_data(text: &str) -> String {
    let bytes = text.as_bytes();
    let mut out = String::with_capacity(text.len());
    let mut i = 0;
    while i < bytes.len() {
        let at_boundary = i == 0 || !is_word_byte(bytes[i - 1]);
        if at_boundary && bytes[i].is_ascii_digit() {
            if let Some(len) = ssn_run(&bytes[i..]) {
                out.push_str("[SSN-REDACTED]");
                i += len;
                continue;
            }
            if let Some(len) = id_run(&bytes[i..]) {
                out.push_str("[ID-REDACTED]");
                i += len;
                continue;
            }
        }
        match text[i..].chars().next() {
            Some(ch) => {
                out.push(ch);
                i += ch.len_utf8();
            }
            None => break,
        }
    }
    out
}

fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// NNN-NN-NNNN followed by a word boundary
fn ssn_run(b: &[u8]) -> Option<usize> {
    if b.len() < 11 {
        return None;
    }
    let shaped = b[0..3].iter().all(u8::is_ascii_digit)
        && b[3] == b'-'
        && b[4..6].iter().all(u8::is_ascii_digit)
        && b[6] == b'-'
        && b[7..11].iter().all(u8::is_ascii_digit);
    if shaped && b.get(11).map_or(true, |&n| !is_word_byte(n)) {
        Some(11)
    } else {
        None
    }
}

/// Ten or more consecutive digits followed by a word boundary
fn id_run(b: &[u8]) -> Option<usize> {
    let len = b.iter().take_while(|c| c.is_ascii_digit()).count();
    if len >= 10 && b.get(len).map_or(true, |&n| !is_word_byte(n)) {
        Some(len)
    } else {
        None
    }
}
