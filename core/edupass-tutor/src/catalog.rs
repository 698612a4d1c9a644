//! Subjects and the tutoring modes offered for each.

use serde::Serialize;

/// A school subject and its tutoring modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Subject {
    /// Display name, also sent to the upstream models.
    pub name: &'static str,
    /// Tutoring modes offered for this subject.
    pub tasks: &'static [&'static str],
}

/// Every subject the application offers.
pub const SUBJECTS: &[Subject] = &[
    Subject {
        name: "数学",
        tasks: &["难题讲解 (分步推导)", "错题分析 (找原因)", "举一反三 (出类似题)", "概念辨析", "口算技巧"],
    },
    Subject {
        name: "英语",
        tasks: &["作文批改 (雅思标准)", "长难句分析 (语法拆解)", "单词记忆 (词根词缀)", "中译英/英译中", "完形填空精讲"],
    },
    Subject {
        name: "语文",
        tasks: &["作文润色 (升格)", "古诗词赏析 (意象/情感)", "阅读理解 (答题模板)", "病句修改", "文言文翻译"],
    },
    Subject {
        name: "物理",
        tasks: &["公式推导", "物理模型分析", "实验原理讲解", "生活中的物理"],
    },
    Subject {
        name: "化学",
        tasks: &["方程式配平", "反应原理分析", "实验现象描述", "物质推断"],
    },
    Subject {
        name: "生物",
        tasks: &["知识点梳理", "遗传概率计算", "实验探究分析"],
    },
    Subject {
        name: "历史",
        tasks: &["时间线梳理", "历史事件评价 (正反面)", "答题术语规范"],
    },
    Subject {
        name: "地理",
        tasks: &["读图分析", "自然地理原理", "人文地理考点"],
    },
    Subject {
        name: "政治",
        tasks: &["时事热点分析", "哲学原理运用", "背诵口诀生成"],
    },
];

/// Looks up a subject by name.
pub fn find_subject(name: &str) -> Option<&'static Subject> {
    SUBJECTS.iter().find(|s| s.name == name)
}

impl Subject {
    /// Returns true if `task` is one of this subject's modes.
    pub fn offers(&self, task: &str) -> bool {
        self.tasks.contains(&task)
    }
}
