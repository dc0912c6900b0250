//! 提示词模板

/// 古文翻译提示词
pub fn translation_prompt(text: &str) -> String {
    format!(
        r#"
请将以下古文翻译成现代汉语：
"{}"

要求：
1. 准确传达原文的意思，保持语义完整性
2. 翻译流畅自然，符合现代汉语表达习惯
3. 保持原文的风格和意境
4. 直接输出翻译结果，不要添加任何解释或说明
"#,
        text
    )
}

/// 古文问答提示词
pub fn qa_prompt(text: &str, question: &str) -> String {
    format!(
        r#"
原文："{}"

问题：{}

请针对上面的古文原文，回答用户的问题。请直接给出答案，不要输出思考过程。
"#,
        text, question
    )
}

/// 实体标注提示词
pub fn annotation_prompt(text: &str) -> String {
    format!(
        r#"
请对以下文本进行实体标注，标出所有的人物、地名、时间、器物、概念。

文本："{}"

要求：
1. 请标注出文中所有的人物（包括人名、称谓）
2. 请标注出文中所有的地名（包括国名、地方名）
3. 请标注出文中所有的时间（包括年代、季节、时辰等）
4. 请标注出文中所有的器物（包括工具、物品、建筑等）
5. 请标注出文中所有的概念（包括抽象概念、思想、制度等）

请直接返回JSON格式的标注结果，格式如下：
[
  {{"text": "实体文本", "label": "人物"}},
  {{"text": "实体文本", "label": "地名"}}
]

注意：
- label 必须是以下之一：人物、地名、时间、器物、概念
- text 是实体在原文中的确切文本
- 只返回JSON数组，不要有其他文字说明
"#,
        text
    )
}
