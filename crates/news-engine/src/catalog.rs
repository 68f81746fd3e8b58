use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// A market theme: the keywords that trigger it and the identifiers it moves.
///
/// `direct` identifiers are first-order movers, `related` ones are
/// supply-chain or derivative exposure and score at half weight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeEntry {
    pub name: String,
    pub keywords: Vec<String>,
    #[serde(default)]
    pub direct: Vec<String>,
    #[serde(default)]
    pub related: Vec<String>,
}

impl ThemeEntry {
    pub fn new(name: &str, keywords: &[&str], direct: &[&str], related: &[&str]) -> Self {
        let owned =
            |items: &[&str]| -> Vec<String> { items.iter().map(|s| s.to_string()).collect() };
        Self {
            name: name.to_string(),
            keywords: owned(keywords),
            direct: owned(direct),
            related: owned(related),
        }
    }
}

/// Immutable theme table, iterated in declaration order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeCatalog {
    themes: Vec<ThemeEntry>,
}

impl ThemeCatalog {
    pub fn new(themes: Vec<ThemeEntry>) -> Result<Self> {
        let mut seen = HashSet::new();
        for theme in &themes {
            if theme.name.trim().is_empty() {
                anyhow::bail!("Theme catalog contains a theme without a name");
            }
            if !seen.insert(theme.name.as_str()) {
                anyhow::bail!("Duplicate theme name in catalog: {}", theme.name);
            }
            if theme.keywords.iter().any(|kw| kw.trim().is_empty()) {
                anyhow::bail!("Theme {} has a blank keyword", theme.name);
            }
        }

        Ok(Self { themes })
    }

    /// Load a catalog from a YAML list of `{name, keywords, direct, related}`
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let themes: Vec<ThemeEntry> =
            serde_yaml::from_str(yaml).context("Failed to parse theme catalog YAML")?;
        Self::new(themes)
    }

    pub fn from_yaml_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read theme catalog: {}", path.display()))?;
        Self::from_yaml_str(&content)
            .with_context(|| format!("Invalid theme catalog: {}", path.display()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &ThemeEntry> {
        self.themes.iter()
    }

    pub fn get(&self, name: &str) -> Option<&ThemeEntry> {
        self.themes.iter().find(|theme| theme.name == name)
    }

    pub fn len(&self) -> usize {
        self.themes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.themes.is_empty()
    }

    /// The built-in Korean equity theme table
    pub fn builtin() -> Self {
        let themes = vec![
            ThemeEntry::new(
                "지정학/전쟁",
                &[
                    "전쟁", "휴전", "군사충돌", "격화", "무력 충돌", "제재", "지정학", "북한",
                    "중동", "우크라이나", "대만", "남중국해", "이스라엘", "하마스", "이란",
                    "러시아", "미사일", "방위비", "국방",
                ],
                &["012450", "079550", "064350", "042660", "003490", "010950", "096770"],
                &["004020", "005490", "009540", "010140", "011200", "011930"],
            ),
            ThemeEntry::new(
                "반도체/AI",
                &[
                    "반도체", "메모리", "HBM", "AI", "칩", "파운드리", "GPU", "엔비디아",
                    "클라우드", "서버", "디램", "낸드", "공급 부족", "증설", "제조 장비",
                ],
                &["005930", "000660", "108320", "000990", "009150", "034220"],
                &["012450", "066570", "093370", "036570", "015760"],
            ),
            ThemeEntry::new(
                "2차전지/EV",
                &[
                    "2차전지", "배터리", "전고체", "양극재", "음극재", "EV", "전기차", "충전소",
                    "리콜", "테슬라", "주행거리",
                ],
                &["051910", "006400", "005380", "000270", "011170"],
                &["012330", "010950", "096770", "034730"],
            ),
            ThemeEntry::new(
                "원자재/에너지",
                &[
                    "유가", "브렌트", "WTI", "OPEC", "감산", "증산", "정유", "원자재", "구리",
                    "철광석", "천연가스", "우라늄", "전력요금",
                ],
                &["010950", "096770", "078930", "004020", "005490"],
                &["003490", "011200", "010140", "009540", "015760"],
            ),
            ThemeEntry::new(
                "금리/환율/매크로",
                &[
                    "금리", "연준", "기준금리", "국채금리", "환율", "달러", "원화", "물가", "CPI",
                    "PPI", "고용", "경기침체", "연착륙", "성장률", "무역수지",
                ],
                &["105560", "055550", "086790", "316140", "028260"],
                &["005930", "000660", "005380", "051910", "006400", "035420", "035720"],
            ),
            ThemeEntry::new(
                "정책/정부",
                &[
                    "정부", "정책", "규제", "완화", "지원책", "세제", "보조금", "입법", "개정",
                    "발표", "공공", "인프라", "디지털", "데이터센터",
                ],
                &["030200", "017670", "034730", "035420", "035720"],
                &["005930", "000660", "051910", "034220", "069960", "008770"],
            ),
            ThemeEntry::new(
                "바이오/헬스케어",
                &[
                    "임상", "허가", "FDA", "식약처", "신약", "백신", "실패", "성공", "의료기기",
                    "제네릭", "바이오",
                ],
                &["068270", "207940", "128940"],
                &["011070", "006280", "003490"],
            ),
            ThemeEntry::new(
                "소비/리테일/관광",
                &[
                    "면세", "관광", "소비 심리", "리테일", "백화점", "중국 관광", "입국", "출국",
                    "유커", "마케팅", "페스티벌",
                ],
                &["008770", "004170", "023530", "069960"],
                &["003490", "000080", "004990"],
            ),
            ThemeEntry::new(
                "조선/해운/물류",
                &[
                    "선박", "조선", "수주", "운임", "해운", "물류", "컨테이너", "친환경 선박",
                    "LNG",
                ],
                &["009540", "010140", "042660", "011200"],
                &["010950", "096770", "005490", "004020"],
            ),
            ThemeEntry::new(
                "통신/데이터센터",
                &["5G", "요금제", "망 투자", "데이터센터", "전력", "클라우드", "IDC", "AI 서버"],
                &["030200", "017670", "032640"],
                &["005930", "000660", "034730", "015760"],
            ),
            ThemeEntry::new(
                "플랫폼/인터넷",
                &[
                    "플랫폼", "검색", "콘텐츠", "게임", "광고", "커머스", "트래픽", "규제",
                    "과징금",
                ],
                &["035420", "035720", "251270"],
                &["034730", "030200", "017670"],
            ),
            ThemeEntry::new(
                "자동차/부품",
                &[
                    "전기차", "SUV", "출시", "리콜", "생산차질", "수출", "판매호조", "자율주행",
                    "로보택시",
                ],
                &["005380", "000270", "012330"],
                &["051910", "006400", "011170", "010950", "096770"],
            ),
        ];

        Self { themes }
    }
}

impl Default for ThemeCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}
