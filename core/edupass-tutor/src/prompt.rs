//! Prompt construction for the two upstream models.
//!
//! The wording is presentation; only the shape (subject-aware OCR
//! instruction, task-keyword strategy) matters to the pipeline.

/// Sentinel the vision model is asked to return for an empty image.
pub const NO_TEXT_SENTINEL: &str = "NO_TEXT_DETECTED";

/// Instruction for the vision model.
pub fn ocr_prompt(subject: &str) -> String {
    if subject == "英语" {
        format!(
            "你是一个精准的 OCR 助手。请识别图片中的【英语】内容。\n\
             保持原文的拼写、大小写和标点，只输出识别到的英文内容。\n\
             如果图片中没有任何英文内容，请输出：{NO_TEXT_SENTINEL}"
        )
    } else {
        format!(
            "你是一个精准的 OCR 助手。请识别图片中的【{subject}】内容。\n\
             图片里是什么符号就输出什么符号，每道题占一行，只输出题目内容。\n\
             如果图片中没有任何内容，请输出：{NO_TEXT_SENTINEL}"
        )
    }
}

/// Teaching strategy hint chosen from keywords in the task label.
pub fn strategy_for(task: &str) -> &'static str {
    if task.contains("分步") {
        "请务必分步骤讲解，每一步都要说明依据。"
    } else if task.contains("举一反三") {
        "讲解完原题后，再出 1 道类似的变式题并给出答案。"
    } else if task.contains("作文") || task.contains("润色") {
        "请按【评分-纠错-点评-升格范文】的结构输出。"
    } else if task.contains("背诵") || task.contains("口诀") {
        "请提供好记的顺口溜或思维导图，帮助记忆。"
    } else {
        "请用通俗易懂的语言讲解，重点突出考点。"
    }
}

/// System prompt for the generation model.
pub fn system_prompt(subject: &str, task: &str) -> String {
    format!(
        "你是一位资深的【{subject}】特级教师。当前任务模式：{task}\n\
         针对学生上传的题目逐题讲解，使用 Markdown 排版。\n\
         行内公式用 $...$，独立公式用 $$...$$。\n\
         教学策略：{}",
        strategy_for(task)
    )
}

/// User message carrying the recognized text.
pub fn user_prompt(recognized_text: &str) -> String {
    format!("学生上传的题目内容如下：\n{recognized_text}\n\n请老师针对以上题目进行讲解。")
}
