use super::*;

const INDENTS: &[&str] = &["", " ", "    ", "\t", "\t  \t", "        "];

fn assert_no_leading_whitespace(text: &str) {
    for line in text.lines() {
        assert!(
            !line.starts_with(|c: char| c.is_whitespace()),
            "line has leading whitespace: {line:?}"
        );
    }
}

#[test]
fn arbitrarily_indented_templates_normalize() {
    for first in INDENTS {
        for second in INDENTS {
            let template = format!("{first}Act as a doctor.{second}\n{second}Answer: <number>.{first}");
            let rendered = strip_all_lines(&template);
            assert_no_leading_whitespace(&rendered);
            assert_eq!(rendered, "Act as a doctor.\nAnswer: <number>.");
        }
    }
}

#[test]
fn rendered_prompts_have_no_leading_whitespace() {
    let labels = LabelSet::from_pairs([(1, "flu"), (2, "cold"), (3, "migraine")]).unwrap();
    for indent in INDENTS {
        let text = format!("{indent}Fever.\n{indent}{indent}Chills.\n{indent}");
        let conversation = build_classification_prompt(&labels, &text);
        assert_no_leading_whitespace(conversation.system_content());
        assert_no_leading_whitespace(conversation.user_content());

        let schema = format!("{indent}CREATE TABLE p (\n{indent}{indent}id INT\n{indent});");
        let conversation = build_sql_prompt(&schema, &format!("{indent}How many?"));
        assert_no_leading_whitespace(conversation.system_content());
        assert_no_leading_whitespace(conversation.user_content());
    }
}

#[test]
fn label_set_from_json_drives_option_list() {
    let labels: LabelSet =
        serde_json::from_str(r#"{"4": "pneumonia", "1": "flu", "9": "bronchitis"}"#).unwrap();
    let conversation = build_classification_prompt(&labels, "Productive cough.");
    assert!(conversation
        .user_content()
        .contains("4. pneumonia\n1. flu\n9. bronchitis"));
}

#[test]
fn system_prompts_are_stable_across_calls() {
    assert_eq!(classification_system_prompt(), classification_system_prompt());
    assert_eq!(sql_system_prompt(), sql_system_prompt());
    let a = build_sql_prompt("schema", "q");
    let b = build_sql_prompt("schema", "q");
    assert_eq!(a, b);
}
