//! OAI-PMH Dublin Core record formatting.
//!
//! Maps an article/journal/section/issue bundle onto the 15-element Dublin
//! Core set and serializes it as an `<oai_dc:dc>` fragment. Element order
//! is fixed: title, creator, subject, description, publisher, contributor,
//! date, type, format, identifier, source, language, relation, coverage,
//! rights. Multilingual fields emit one element per locale with an
//! `xml:lang` attribute; all values are XML-escaped.

use std::fmt::Write;

use chrono::NaiveDate;
use serde::Serialize;

use crate::types::LocalizedText;

/// A Dublin Core record ready for serialization.
///
/// Assembly from database rows happens in the API layer; this struct only
/// captures the mapped elements.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DublinCoreRecord {
    pub title: LocalizedText,
    /// One line per author, `Full Name; Affiliation`.
    pub creators: Vec<String>,
    pub subject: LocalizedText,
    pub description: LocalizedText,
    pub publisher: LocalizedText,
    pub contributor: LocalizedText,
    /// Issue publication date, emitted as `YYYY-MM-DD`.
    pub date: Option<NaiveDate>,
    pub types: LocalizedText,
    /// One entry per galley file type.
    pub formats: Vec<String>,
    /// Canonical article URL.
    pub identifier: String,
    /// Journal title plus issue identification and pages, per locale.
    pub source: LocalizedText,
    pub language: String,
    /// One entry per supplementary-file download URL.
    pub relations: Vec<String>,
    pub coverage: LocalizedText,
    pub rights: LocalizedText,
}

impl DublinCoreRecord {
    /// Serialize as an `oai_dc:dc` XML fragment.
    pub fn to_xml(&self) -> String {
        let mut xml = String::new();
        xml.push_str(concat!(
            "<oai_dc:dc\n",
            "\txmlns:oai_dc=\"http://www.openarchives.org/OAI/2.0/oai_dc/\"\n",
            "\txmlns:dc=\"http://purl.org/dc/elements/1.1/\"\n",
            "\txmlns:xsi=\"http://www.w3.org/2001/XMLSchema-instance\"\n",
            "\txsi:schemaLocation=\"http://www.openarchives.org/OAI/2.0/oai_dc/\n",
            "\thttp://www.openarchives.org/OAI/2.0/oai_dc.xsd\">\n",
        ));

        write_localized(&mut xml, "title", &self.title);
        write_values(&mut xml, "creator", &self.creators);
        write_localized(&mut xml, "subject", &self.subject);
        write_localized(&mut xml, "description", &self.description);
        write_localized(&mut xml, "publisher", &self.publisher);
        write_localized(&mut xml, "contributor", &self.contributor);
        if let Some(date) = self.date {
            write_value(&mut xml, "date", &date.format("%Y-%m-%d").to_string());
        }
        write_localized(&mut xml, "type", &self.types);
        write_values(&mut xml, "format", &self.formats);
        if !self.identifier.is_empty() {
            write_value(&mut xml, "identifier", &self.identifier);
        }
        write_localized(&mut xml, "source", &self.source);
        if !self.language.is_empty() {
            write_value(&mut xml, "language", &self.language);
        }
        write_values(&mut xml, "relation", &self.relations);
        write_localized(&mut xml, "coverage", &self.coverage);
        // Rights values carry no language attribute.
        for value in self.rights.values() {
            write_value(&mut xml, "rights", value);
        }

        xml.push_str("</oai_dc:dc>\n");
        xml
    }
}

/// Build the `creator` line for one author.
pub fn creator_line(full_name: &str, affiliation: &str) -> String {
    if affiliation.is_empty() {
        full_name.to_string()
    } else {
        format!("{full_name}; {affiliation}")
    }
}

/// Build the per-locale `source` element from the journal title, issue
/// identification, and the article's page range.
pub fn source_text(
    journal_title: &LocalizedText,
    issue_identification: &str,
    pages: &str,
) -> LocalizedText {
    let page_suffix = if pages.is_empty() {
        String::new()
    } else {
        format!("; {pages}")
    };
    journal_title
        .iter()
        .map(|(locale, title)| {
            (
                locale.clone(),
                format!("{title}; {issue_identification}{page_suffix}"),
            )
        })
        .collect()
}

/// The `publisher` element: the publisher institution in the journal's
/// primary locale when configured, otherwise the journal title.
pub fn publisher_text(
    journal_title: &LocalizedText,
    primary_locale: &str,
    publisher_institution: Option<&str>,
) -> LocalizedText {
    match publisher_institution {
        Some(institution) if !institution.is_empty() => {
            let mut map = LocalizedText::new();
            map.insert(primary_locale.to_string(), institution.to_string());
            map
        }
        _ => journal_title.clone(),
    }
}

/// Merge a second localized field into a base one, joining collisions
/// with `"; "`. Used to fold the article's own type onto the section's.
pub fn merge_localized(base: &LocalizedText, extra: &LocalizedText) -> LocalizedText {
    let mut merged = base.clone();
    for (locale, value) in extra {
        merged
            .entry(locale.clone())
            .and_modify(|existing| {
                existing.push_str("; ");
                existing.push_str(value);
            })
            .or_insert_with(|| value.clone());
    }
    merged
}

fn write_value(xml: &mut String, name: &str, value: &str) {
    writeln!(xml, "\t<dc:{name}>{}</dc:{name}>", escape_xml(value)).ok();
}

fn write_values(xml: &mut String, name: &str, values: &[String]) {
    for value in values {
        write_value(xml, name, value);
    }
}

fn write_localized(xml: &mut String, name: &str, values: &LocalizedText) {
    for (locale, value) in values {
        let lang = locale.replace('_', "-");
        writeln!(
            xml,
            "\t<dc:{name} xml:lang=\"{lang}\">{}</dc:{name}>",
            escape_xml(value)
        )
        .ok();
    }
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
