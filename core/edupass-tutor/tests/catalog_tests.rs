use edupass_tutor::prompt::{ocr_prompt, strategy_for, system_prompt, user_prompt, NO_TEXT_SENTINEL};
use edupass_tutor::{find_subject, SUBJECTS};
use std::collections::HashSet;

#[test]
fn nine_subjects_with_unique_names() {
    assert_eq!(SUBJECTS.len(), 9);
    let names: HashSet<_> = SUBJECTS.iter().map(|s| s.name).collect();
    assert_eq!(names.len(), SUBJECTS.len());
    assert!(SUBJECTS.iter().all(|s| !s.tasks.is_empty()));
}

#[test]
fn find_subject_by_name() {
    let math = find_subject("数学").unwrap();
    assert!(math.offers("举一反三 (出类似题)"));
    assert!(!math.offers("方程式配平"));
    assert!(find_subject("Math").is_none());
}

#[test]
fn catalogue_serializes_for_clients() {
    let json = serde_json::to_value(SUBJECTS).unwrap();
    assert_eq!(json[0]["name"], "数学");
    assert!(json[0]["tasks"].as_array().unwrap().len() >= 4);
}

#[test]
fn ocr_prompt_mentions_subject_and_sentinel() {
    let p = ocr_prompt("化学");
    assert!(p.contains("化学"));
    assert!(p.contains(NO_TEXT_SENTINEL));
}

#[test]
fn english_ocr_prompt_is_distinct() {
    assert_ne!(ocr_prompt("英语"), ocr_prompt("数学").replace("数学", "英语"));
    assert!(ocr_prompt("英语").contains(NO_TEXT_SENTINEL));
}

#[test]
fn strategy_keywords() {
    assert!(strategy_for("难题讲解 (分步推导)").contains("分步骤"));
    assert!(strategy_for("举一反三 (出类似题)").contains("变式题"));
    assert!(strategy_for("作文批改 (雅思标准)").contains("升格范文"));
    assert!(strategy_for("作文润色 (升格)").contains("升格范文"));
    assert!(strategy_for("背诵口诀生成").contains("顺口溜"));
    assert!(strategy_for("读图分析").contains("通俗易懂"));
}

#[test]
fn system_prompt_carries_subject_task_and_strategy() {
    let p = system_prompt("物理", "公式推导");
    assert!(p.contains("物理"));
    assert!(p.contains("公式推导"));
    assert!(p.contains(strategy_for("公式推导")));
}

#[test]
fn user_prompt_embeds_text() {
    assert!(user_prompt("3x = 9").contains("3x = 9"));
}
