//! Built-in content catalog.
//!
//! The shipped copy: four situations with their anchor content, three
//! explore modules, and five archetypes. Hosts that want different copy
//! load their own catalog through the YAML/JSON loader instead.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use super::{
    AftercareContent, AnchorContent, Archetype, CognitiveStep, ContentCatalog, ExploreModule,
    Question, QuestionOption, SessionAction, Situation, ValueStatement,
};

static BUILTIN: Lazy<ContentCatalog> = Lazy::new(build);

/// The built-in catalog, constructed once on first use.
pub fn builtin_catalog() -> &'static ContentCatalog {
    &BUILTIN
}

fn step(text: &str) -> CognitiveStep {
    CognitiveStep {
        text: text.to_string(),
    }
}

fn option(id: &str, text: &str, archetype: &str) -> QuestionOption {
    QuestionOption {
        id: id.to_string(),
        text: text.to_string(),
        archetype: archetype.to_string(),
    }
}

fn question(id: &str, text: &str, options: Vec<QuestionOption>) -> Question {
    Question {
        id: id.to_string(),
        text: text.to_string(),
        options,
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn anchor_content(
    id: &str,
    steps: Vec<CognitiveStep>,
    old_narrative: &str,
    new_cognition: &str,
) -> (String, AnchorContent) {
    (
        id.to_string(),
        AnchorContent {
            id: id.to_string(),
            situation: id.to_string(),
            cognitive_steps: steps,
            old_narrative: old_narrative.to_string(),
            new_cognition: new_cognition.to_string(),
        },
    )
}

fn archetype(
    id: &str,
    name: &str,
    definition: &str,
    identify_statement: &str,
    allow_statement: &str,
    forbidden: &[&str],
) -> (String, Archetype) {
    (
        id.to_string(),
        Archetype {
            id: id.to_string(),
            name: name.to_string(),
            label: "当前反应模式".to_string(),
            definition: definition.to_string(),
            identify_statement: identify_statement.to_string(),
            allow_statement: allow_statement.to_string(),
            forbidden: strings(forbidden),
        },
    )
}

fn build() -> ContentCatalog {
    let situations = vec![
        Situation {
            id: "bracing".to_string(),
            label: "我的肩膀一直耸着".to_string(),
        },
        Situation {
            id: "blaming".to_string(),
            label: "我在自责".to_string(),
        },
        Situation {
            id: "exhausted".to_string(),
            label: "我很疲惫，但停不下来".to_string(),
        },
        Situation {
            id: "numb".to_string(),
            label: "我感觉不到自己在呼吸".to_string(),
        },
    ];

    let anchor_contents: HashMap<String, AnchorContent> = [
        anchor_content(
            "bracing",
            vec![
                step("你此刻的沉重，"),
                step("不是因为你做错了什么，"),
                step("而是你把「我很在意」"),
                step("误当成了\n「这必须由我来解决」。"),
            ],
            "这件事必须由我负责",
            "在意，不等于必须扛起来。",
        ),
        anchor_content(
            "blaming",
            vec![
                step("你正在对自己说一些很重的话。"),
                step("这种声音，可能不是\"事实\"，\n而是一种旧的保护模式。"),
                step("在很早的时候，\n自责曾经帮你避开更大的惩罚。"),
                step("但现在，\n它已经不再是保护，而是消耗。"),
            ],
            "都是我的问题",
            "自责的声音，不是真相。",
        ),
        anchor_content(
            "exhausted",
            vec![
                step("你已经很累了，\n但身体还在自动运行。"),
                step("这不是意志力，\n这是神经系统还没有接到\"可以停\"的信号。"),
                step("长期处于这种状态，\n系统会以为\"停下=危险\"。"),
                step("你需要的，不是更努力，\n而是一个明确的\"可以停\"的许可。"),
            ],
            "再撑一下就好了",
            "累了就是累了，不需要理由。",
        ),
        anchor_content(
            "numb",
            vec![
                step("你感觉有点空，\n好像什么都没那么重要了。"),
                step("这种\"麻\"，是一种保护。\n系统在帮你降低能耗。"),
                step("不是你不在乎了，\n是你的感知被临时关闭了。"),
                step("此刻不需要\"找回感觉\"，\n只需要让这种状态被看见。"),
            ],
            "我是不是出了什么问题",
            "麻木是一种保护，不是缺陷。",
        ),
    ]
    .into_iter()
    .collect();

    let modules: HashMap<String, ExploreModule> = [
        (
            "hesitation".to_string(),
            ExploreModule {
                id: "hesitation".to_string(),
                name: "犹豫".to_string(),
                subtitle: "卡在选择里".to_string(),
                description: "行动被卡住，但认知仍在高速运转".to_string(),
                primary_archetypes: strings(&["carrier", "overthinker"]),
                secondary_archetypes: strings(&["rational"]),
                tiebreaker: strings(&["overthinker", "carrier", "rational"]),
                questions: vec![
                    question(
                        "h1",
                        "你现在卡住的，更像哪一种？",
                        vec![
                            option("h1a", "选哪个都会影响别人", "carrier"),
                            option("h1b", "总觉得再想想会更稳妥", "overthinker"),
                            option("h1c", "明明很累，但还是得继续", "carrier"),
                            option("h1d", "说不清为什么，就是动不了", "sinking"),
                        ],
                    ),
                    question(
                        "h2",
                        "当你想到\"万一选错了\"，第一反应更接近？",
                        vec![
                            option("h2a", "先算清楚，尽量别出错", "rational"),
                            option("h2b", "自己多承担一点就好", "carrier"),
                            option("h2c", "情绪一下子就上来了", "sinking"),
                            option("h2d", "不想再想了", "shutdown"),
                        ],
                    ),
                ],
            },
        ),
        (
            "emotional".to_string(),
            ExploreModule {
                id: "emotional".to_string(),
                name: "情绪乱".to_string(),
                subtitle: "有点接不住".to_string(),
                description: "情绪信号强于认知控制".to_string(),
                primary_archetypes: strings(&["sinking"]),
                secondary_archetypes: strings(&[
                    "carrier",
                    "rational",
                    "overthinker",
                    "shutdown",
                ]),
                tiebreaker: strings(&["sinking", "carrier", "rational"]),
                questions: vec![
                    question(
                        "e1",
                        "此刻对你影响最大的，是哪一层？",
                        vec![
                            option("e1a", "情绪已经压过理性", "sinking"),
                            option("e1b", "身体明显吃不消了", "carrier"),
                            option("e1c", "脑子停不下来", "rational"),
                            option("e1d", "其实什么都不想处理", "shutdown"),
                        ],
                    ),
                    question(
                        "e2",
                        "你现在更像在做哪件事？",
                        vec![
                            option("e2a", "硬撑着不让自己垮", "carrier"),
                            option("e2b", "拼命想把事情想明白", "rational"),
                            option("e2c", "什么都不想干", "shutdown"),
                            option("e2d", "已经有点接不住了", "sinking"),
                        ],
                    ),
                ],
            },
        ),
        (
            "shutdown".to_string(),
            ExploreModule {
                id: "shutdown".to_string(),
                name: "什么都不想".to_string(),
                subtitle: "系统低电量".to_string(),
                description: "系统主动降载，进入最低能耗模式".to_string(),
                primary_archetypes: strings(&["shutdown"]),
                secondary_archetypes: strings(&["sinking", "carrier"]),
                tiebreaker: strings(&["shutdown", "sinking", "carrier"]),
                questions: vec![
                    question(
                        "s1",
                        "你现在的状态更接近？",
                        vec![
                            option("s1a", "彻底没电了", "shutdown"),
                            option("s1b", "不想回应任何事", "shutdown"),
                            option("s1c", "有点情绪，但懒得处理", "sinking"),
                            option("s1d", "只是暂时不想动", "carrier"),
                        ],
                    ),
                    question(
                        "s2",
                        "如果现在必须面对一件事，你会？",
                        vec![
                            option("s2a", "完全不想碰", "shutdown"),
                            option("s2b", "会烦躁或低落", "sinking"),
                            option("s2c", "先拖着再说", "shutdown"),
                            option("s2d", "勉强分析一下", "rational"),
                        ],
                    ),
                ],
            },
        ),
    ]
    .into_iter()
    .collect();

    let archetypes: HashMap<String, Archetype> = [
        archetype(
            "carrier",
            "扛着走的人",
            "当一切开始变难时，TA的第一反应是：我来扛。",
            "你不是没事，只是一直把\"该扛的\"放在自己这边。",
            "此刻不再继续扛，也不代表你做错了什么。",
            &["你可以试着放下", "你已经很棒了", "你已经做得很好了"],
        ),
        archetype(
            "overthinker",
            "反复纠结的人",
            "当事情没有明确答案时，TA会反复推演、来回拉扯，试图找到\"那个最不后悔的选项\"。",
            "你现在卡住的，不是选择本身，而是你太在意\"会不会后悔\"。",
            "现在不做决定，也是一种被允许的状态。",
            &["别想太多", "相信直觉", "选哪个都一样"],
        ),
        archetype(
            "sinking",
            "情绪坠落的人",
            "当压力超过承载阈值时，TA会整体下沉，情绪先于理性失控。",
            "你不是想不开，是已经超出了自己能承受的范围。",
            "在这种负载下，什么都不做，是系统的自然反应。",
            &["情绪会过去的", "想想为什么会这样", "振作起来"],
        ),
        archetype(
            "rational",
            "强行理性的人",
            "当感受变得不可控时，TA会迅速切换到理性模式，用分析压住情绪。",
            "你现在用理性撑着，是因为一旦停下来，情绪就会失控。",
            "不继续分析，并不会让事情变得更糟。",
            &["你应该多感受情绪", "不要压抑自己", "你在逃避"],
        ),
        archetype(
            "shutdown",
            "什么都不想的人",
            "当一切都显得过于耗能时，TA的系统会选择：直接关机。",
            "你不是不在乎，是已经没有多余能量再处理任何事。",
            "现在什么都不回应，也是在保护自己。",
            &["你要振作起来", "再坚持一下", "不要逃避"],
        ),
    ]
    .into_iter()
    .collect();

    ContentCatalog {
        situations,
        anchor_contents,
        modules,
        archetypes,
        value_statement: ValueStatement {
            title: String::new(),
            content: "这里不分析你是谁，\n也不告诉你该成为什么。\n\n如果你只是想在此刻站稳一下，可以从这里开始。"
                .to_string(),
            button_text: "我为自己而来".to_string(),
        },
        aftercare: AftercareContent {
            title: String::new(),
            message: "这一轮已经完成了".to_string(),
            subtitle: "你不需要再继续停留，\n也不需要再处理任何东西。".to_string(),
            grounding_actions: strings(&["喝一口水", "站起来活动一下", "看一眼窗外或远处"]),
            main_action: Some(SessionAction {
                id: "back-to-life".to_string(),
                label: "回到生活".to_string(),
            }),
            secondary_hint: Some("想留下一点记录？".to_string()),
            secondary_action: Some(SessionAction {
                id: "save".to_string(),
                label: "保存这次锚定".to_string(),
            }),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_shape() {
        let catalog = builtin_catalog();
        assert_eq!(catalog.situations.len(), 4);
        assert_eq!(catalog.anchor_contents.len(), 4);
        assert_eq!(catalog.modules.len(), 3);
        assert_eq!(catalog.archetypes.len(), 5);
        assert!(catalog.has_situation("bracing"));
        assert_eq!(catalog.cognitive_step_count("blaming"), 4);
        assert_eq!(catalog.cognitive_step_count("nonexistent"), 0);
    }

    #[test]
    fn test_builtin_validates() {
        builtin_catalog().validate().unwrap();
    }

    #[test]
    fn test_every_situation_has_content() {
        let catalog = builtin_catalog();
        for situation in &catalog.situations {
            let content = catalog.anchor_content(&situation.id).unwrap();
            assert_eq!(content.situation, situation.id);
            assert!(!content.cognitive_steps.is_empty());
        }
    }
}
