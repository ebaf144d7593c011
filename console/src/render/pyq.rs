use client::models::PyqRecord;

pub const EMPTY_PYQS: &str = "No PYQs found";

/// One card per paper, input order. `base_url` turns the relative `file_url`
/// into a usable download link.
pub fn pyq_cards(pyqs: &[PyqRecord], base_url: &str) -> String {
    if pyqs.is_empty() {
        return EMPTY_PYQS.to_string();
    }

    pyqs.iter()
        .map(|pyq| {
            format!(
                "{}\n  Semester {} | Year {} | {}\n  Uploaded by {} on {}\n  Download: {}{}",
                pyq.subject,
                pyq.semester,
                pyq.year,
                capitalize(&pyq.exam_type),
                pyq.uploaded_by,
                pyq.uploaded_at.format("%Y-%m-%d"),
                base_url,
                pyq.file_url
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn pyq(subject: &str) -> PyqRecord {
        PyqRecord {
            id: "p1".into(),
            subject: subject.into(),
            semester: 5,
            year: 2023,
            exam_type: "midterm".into(),
            file_url: "/uploads/pyq/p1.pdf".into(),
            uploaded_by: "admin1".into(),
            uploaded_at: Utc.with_ymd_and_hms(2024, 1, 15, 10, 0, 0).unwrap(),
        }
    }

    #[test]
    fn empty_input_renders_empty_state() {
        assert_eq!(pyq_cards(&[], "http://localhost:8000"), EMPTY_PYQS);
    }

    #[test]
    fn card_count_matches_input() {
        let pyqs = vec![pyq("Networks"), pyq("Databases")];
        let out = pyq_cards(&pyqs, "http://localhost:8000");
        assert_eq!(out.matches("Download:").count(), 2);
        assert!(out.find("Networks").unwrap() < out.find("Databases").unwrap());
    }

    #[test]
    fn download_link_joins_base_url() {
        let out = pyq_cards(&[pyq("Networks")], "http://localhost:8000");
        assert!(out.contains("Download: http://localhost:8000/uploads/pyq/p1.pdf"));
    }

    #[test]
    fn exam_type_is_capitalized() {
        let out = pyq_cards(&[pyq("Networks")], "");
        assert!(out.contains("Midterm"));
    }
}
