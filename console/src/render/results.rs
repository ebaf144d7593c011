use client::models::ResultRecord;

pub const EMPTY_RESULTS: &str = "No results available";

/// One card per result, input order (the student view).
pub fn result_cards(results: &[ResultRecord]) -> String {
    if results.is_empty() {
        return EMPTY_RESULTS.to_string();
    }

    results
        .iter()
        .map(result_card)
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Admin view: results grouped by student, group order = first appearance in
/// the input, intra-group order as supplied.
pub fn grouped_by_student(results: &[ResultRecord]) -> String {
    if results.is_empty() {
        return EMPTY_RESULTS.to_string();
    }

    group_by_student(results)
        .into_iter()
        .map(|(student_id, group)| {
            let cards = group
                .into_iter()
                .map(result_card)
                .collect::<Vec<_>>()
                .join("\n");
            format!("Student: {student_id}\n{cards}")
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// First-seen grouping; a `HashMap` would scramble group order.
pub fn group_by_student(results: &[ResultRecord]) -> Vec<(&str, Vec<&ResultRecord>)> {
    let mut groups: Vec<(&str, Vec<&ResultRecord>)> = Vec::new();
    for result in results {
        match groups
            .iter_mut()
            .find(|(student_id, _)| *student_id == result.student_id)
        {
            Some((_, group)) => group.push(result),
            None => groups.push((result.student_id.as_str(), vec![result])),
        }
    }
    groups
}

fn result_card(result: &ResultRecord) -> String {
    let mut card = format!("Semester {} - {}", result.semester, result.academic_year);
    if let Some(sgpa) = result.sgpa {
        card.push_str(&format!("  SGPA: {sgpa:.2}"));
    }
    if let Some(cgpa) = result.cgpa {
        card.push_str(&format!("  CGPA: {cgpa:.2}"));
    }
    if let Some(file_url) = &result.file_url {
        card.push_str(&format!("  [PDF: {file_url}]"));
    }
    for grade in &result.subjects {
        card.push_str(&format!("\n  {}: {}", grade.subject, grade.grade));
    }
    card
}

#[cfg(test)]
mod tests {
    use super::*;
    use client::models::SubjectGrade;

    fn result(student_id: &str, semester: i32) -> ResultRecord {
        ResultRecord {
            id: None,
            student_id: student_id.into(),
            semester,
            academic_year: "2023-24".into(),
            subjects: vec![SubjectGrade {
                subject: "Databases".into(),
                grade: "A".into(),
                marks: None,
                credits: None,
            }],
            sgpa: Some(8.4),
            cgpa: None,
            file_url: None,
            uploaded_by: None,
            uploaded_at: None,
        }
    }

    #[test]
    fn empty_input_renders_empty_state() {
        assert_eq!(result_cards(&[]), EMPTY_RESULTS);
        assert_eq!(grouped_by_student(&[]), EMPTY_RESULTS);
    }

    #[test]
    fn groups_preserve_first_seen_order() {
        let results = vec![
            result("S2", 1),
            result("S1", 1),
            result("S2", 2),
            result("S3", 1),
        ];
        let groups = group_by_student(&results);
        let order: Vec<_> = groups.iter().map(|(id, _)| *id).collect();
        assert_eq!(order, vec!["S2", "S1", "S3"]);
        assert_eq!(groups[0].1.len(), 2);
    }

    #[test]
    fn flattening_groups_reproduces_first_seen_then_input_order() {
        let results = vec![result("S2", 1), result("S1", 1), result("S2", 2)];
        let flattened: Vec<(String, i32)> = group_by_student(&results)
            .into_iter()
            .flat_map(|(_, group)| group)
            .map(|r| (r.student_id.clone(), r.semester))
            .collect();
        assert_eq!(
            flattened,
            vec![
                ("S2".to_string(), 1),
                ("S2".to_string(), 2),
                ("S1".to_string(), 1),
            ]
        );
    }

    #[test]
    fn card_count_matches_input_order() {
        let results = vec![result("S1", 2), result("S1", 1)];
        let out = result_cards(&results);
        assert_eq!(out.matches("Semester").count(), 2);
        assert!(out.find("Semester 2").unwrap() < out.find("Semester 1").unwrap());
    }

    #[test]
    fn sgpa_renders_with_two_decimals() {
        let out = result_cards(&[result("S1", 1)]);
        assert!(out.contains("SGPA: 8.40"));
    }
}
