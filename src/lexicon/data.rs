use crate::models::{
    Axis, AxisImpact, AxisTerm, DeclaredLevel, IntensityModifier, KeywordPattern, LevelTerm,
    Lexicon, SynonymGroup,
};

fn words(list: &[&str]) -> Vec<String> {
    list.iter().map(|w| w.to_string()).collect()
}

fn axis_terms(axis: Axis, terms: &[&str]) -> Vec<AxisTerm> {
    terms
        .iter()
        .map(|t| AxisTerm {
            axis,
            term: t.to_string(),
        })
        .collect()
}

fn level_terms(level: DeclaredLevel, terms: &[&str], evaluative: bool) -> Vec<LevelTerm> {
    terms
        .iter()
        .map(|t| LevelTerm {
            level,
            term: t.to_string(),
            evaluative,
        })
        .collect()
}

fn patterns() -> Vec<KeywordPattern> {
    vec![
        // Positive valence
        KeywordPattern::new(&["mutlu"], AxisImpact::new(3.0, 1.0, -1.0), 1.0).with_emotion("happy"),
        KeywordPattern::new(&["harika", "şahane"], AxisImpact::new(3.0, 1.5, -1.0), 0.9)
            .with_emotion("happy"),
        KeywordPattern::new(&["iyiyim", "iyi hissediyorum"], AxisImpact::new(2.0, 0.5, -0.5), 0.8)
            .with_emotion("content"),
        KeywordPattern::new(&["keyfim yerinde"], AxisImpact::new(2.5, 1.0, -1.0), 0.9)
            .with_emotion("content"),
        KeywordPattern::new(&["sakin"], AxisImpact::new(1.5, -1.0, -3.0), 0.9).with_emotion("calm"),
        KeywordPattern::new(&["heyecan"], AxisImpact::new(2.0, 3.0, 1.0), 0.9).with_emotion("excited"),
        KeywordPattern::new(&["enerjik"], AxisImpact::new(1.0, 3.0, 0.0), 1.0).with_emotion("energetic"),
        KeywordPattern::new(&["umutlu", "iyimser"], AxisImpact::new(2.0, 1.0, -1.0), 0.8)
            .with_emotion("hopeful"),
        KeywordPattern::new(&["minnettar", "şükür"], AxisImpact::new(2.0, 0.5, -1.0), 0.8)
            .with_emotion("grateful"),
        KeywordPattern::new(&["gururlu", "gurur duyuyorum"], AxisImpact::new(2.0, 1.0, 0.0), 0.8)
            .with_emotion("proud"),
        KeywordPattern::new(&["rahatla"], AxisImpact::new(1.5, -0.5, -2.5), 0.9).with_emotion("relieved"),
        // Negative valence
        KeywordPattern::new(&["üzgün"], AxisImpact::new(-3.0, -1.0, 1.0), 1.0).with_emotion("sad"),
        KeywordPattern::new(&["depresif", "depresyon", "çökkün"], AxisImpact::new(-4.0, -2.0, 1.0), 1.2)
            .with_emotion("sad"),
        KeywordPattern::new(&["ağlıyorum", "ağladım", "ağlamak"], AxisImpact::new(-3.0, -1.0, 1.5), 1.0)
            .with_emotion("sad"),
        KeywordPattern::new(&["umutsuz", "çaresiz"], AxisImpact::new(-4.0, -2.0, 2.0), 1.1)
            .with_emotion("hopeless"),
        KeywordPattern::new(&["yalnızım", "yalnız hissediyorum", "yalnızlık"], AxisImpact::new(-2.5, -1.0, 1.0), 0.9)
            .with_emotion("lonely")
            .with_trigger("loneliness"),
        KeywordPattern::new(&["berbat", "kötüyüm", "kötü hissediyorum"], AxisImpact::new(-3.0, -1.0, 1.0), 0.9)
            .with_emotion("sad"),
        KeywordPattern::new(&["sinirli"], AxisImpact::new(-3.0, 2.0, 2.0), 1.0).with_emotion("angry"),
        KeywordPattern::new(&["yorgun"], AxisImpact::new(-1.0, -3.0, 0.0), 1.0).with_emotion("tired"),
        KeywordPattern::new(&["uykusuz"], AxisImpact::new(-1.0, -2.5, 1.0), 0.9)
            .with_emotion("tired")
            .with_trigger("sleep"),
        KeywordPattern::new(&["sıkıl"], AxisImpact::new(-1.5, -2.0, 0.0), 0.8).with_emotion("bored"),
        KeywordPattern::new(&["kaygılı"], AxisImpact::new(-2.0, 1.0, 3.0), 1.0).with_emotion("anxious"),
        KeywordPattern::new(&["stres"], AxisImpact::new(-2.0, 1.0, 3.0), 1.0).with_emotion("stressed"),
        KeywordPattern::new(&["panik"], AxisImpact::new(-2.0, 2.0, 4.0), 1.2).with_emotion("anxious"),
        KeywordPattern::new(&["korkuyorum", "korktum", "korkmuş"], AxisImpact::new(-2.0, 1.0, 3.0), 1.0)
            .with_emotion("scared"),
        KeywordPattern::new(&["bunal"], AxisImpact::new(-2.0, -1.0, 2.5), 1.0).with_emotion("overwhelmed"),
        // Triggers
        KeywordPattern::new(&["işyeri", "patron", "toplantı", "mesai", "teslim tarihi"], AxisImpact::new(-0.5, 0.0, 1.0), 0.6)
            .with_trigger("work")
            .with_category("work"),
        KeywordPattern::new(&["ailem", "annem", "babam", "kardeşim"], AxisImpact::new(0.0, 0.0, 0.5), 0.5)
            .with_trigger("family")
            .with_category("family"),
        KeywordPattern::new(&["sevgilim", "eşim", "ayrılık"], AxisImpact::new(0.0, 0.0, 0.5), 0.5)
            .with_trigger("relationship")
            .with_category("relationship"),
        KeywordPattern::new(&["kavga", "tartıştık", "tartışma"], AxisImpact::new(-1.5, 1.0, 1.5), 0.8)
            .with_emotion("angry")
            .with_trigger("conflict"),
        KeywordPattern::new(&["hastayım", "ağrı", "hastane", "doktor"], AxisImpact::new(-1.0, -1.0, 1.0), 0.7)
            .with_trigger("health")
            .with_category("health"),
        KeywordPattern::new(&["sınav", "ödev", "okul"], AxisImpact::new(-0.5, 0.0, 1.5), 0.7)
            .with_trigger("school")
            .with_category("school"),
        KeywordPattern::new(&["borç", "kira", "fatura", "param yok"], AxisImpact::new(-1.0, 0.0, 1.5), 0.7)
            .with_trigger("money")
            .with_category("money"),
        KeywordPattern::new(&["uyuyamadım", "uykusuzluk", "kabus"], AxisImpact::new(-1.0, -2.0, 1.0), 0.8)
            .with_trigger("sleep")
            .with_category("sleep"),
        // Activities
        KeywordPattern::new(&["spor", "koşu", "yürüyüş", "egzersiz", "yoga", "antrenman"], AxisImpact::new(1.0, 1.5, -1.0), 0.7)
            .with_activity("exercise")
            .with_category("exercise"),
        KeywordPattern::new(&["arkadaşlarımla", "arkadaşımla", "buluştuk"], AxisImpact::new(1.0, 0.5, -0.5), 0.6)
            .with_activity("socializing")
            .with_category("social"),
        KeywordPattern::new(&["meditasyon", "nefes egzersizi"], AxisImpact::new(1.0, -0.5, -2.0), 0.7)
            .with_activity("meditation")
            .with_category("meditation"),
        KeywordPattern::new(&["müzik", "şarkı"], AxisImpact::new(1.0, 0.5, -0.5), 0.5)
            .with_activity("music")
            .with_category("music"),
        KeywordPattern::new(&["kitap okudum", "kitap okuyorum"], AxisImpact::new(0.5, 0.0, -0.5), 0.5)
            .with_activity("reading")
            .with_category("reading"),
        KeywordPattern::new(&["doğada", "parkta", "sahilde"], AxisImpact::new(1.0, 0.5, -1.0), 0.5)
            .with_activity("outdoors")
            .with_category("outdoors"),
        KeywordPattern::new(&["iyi uyudum", "dinlendim"], AxisImpact::new(1.0, 2.0, -0.5), 0.7)
            .with_activity("rest")
            .with_category("rest"),
    ]
}

fn synonyms() -> Vec<SynonymGroup> {
    vec![
        SynonymGroup::new("mutlu", &["sevinçli", "neşeli", "keyifli", "memnun"]),
        SynonymGroup::new("harika", &["muhteşem", "süper", "mükemmel"]),
        SynonymGroup::new("üzgün", &["mutsuz", "kederli", "hüzünlü"]),
        SynonymGroup::new("sinirli", &["öfkeli", "kızgın", "asabi"]),
        SynonymGroup::new("yorgun", &["bitkin", "halsiz", "tükenmiş"]),
        SynonymGroup::new("kaygılı", &["endişeli", "tedirgin", "gergin"]),
        SynonymGroup::new("sakin", &["huzurlu", "dingin"]),
        SynonymGroup::new("enerjik", &["dinç", "zinde"]),
    ]
}

fn intensity_modifiers() -> Vec<IntensityModifier> {
    vec![
        IntensityModifier::new("çok", 1.5),
        IntensityModifier::new("aşırı", 1.8),
        IntensityModifier::new("son derece", 1.8),
        IntensityModifier::new("inanılmaz", 1.7),
        IntensityModifier::new("fazlasıyla", 1.6),
        IntensityModifier::new("gerçekten", 1.4),
        IntensityModifier::new("epey", 1.3),
        IntensityModifier::new("oldukça", 1.3),
        IntensityModifier::new("bayağı", 1.3),
        IntensityModifier::new("biraz", 0.6),
        IntensityModifier::new("hafif", 0.6),
        IntensityModifier::new("azıcık", 0.5),
        IntensityModifier::new("birazcık", 0.5),
    ]
}

impl Default for Lexicon {
    /// The built-in Turkish lexicon
    fn default() -> Self {
        Self {
            patterns: patterns(),
            synonyms: synonyms(),
            intensity_modifiers: intensity_modifiers(),
            negation_words: words(&["değil", "hiç", "yok", "asla", "hiçbir"]),
            uncertainty_words: words(&[
                "sanırım",
                "galiba",
                "belki",
                "herhalde",
                "sanki",
                "bilmiyorum",
                "emin değilim",
            ]),
            crisis_phrases: words(&[
                "intihar",
                "kendimi öldür",
                "ölmek istiyorum",
                "yaşamak istemiyorum",
                "kendime zarar",
                "hayatıma son",
                "canıma kıy",
                "her şeyi bitirmek istiyorum",
            ]),
            contrast_words: words(&[
                "ama",
                "fakat",
                "ancak",
                "lakin",
                "oysa",
                "halbuki",
                "yine de",
                "buna rağmen",
            ]),
            axis_terms: axis_terms(Axis::Mood, &["mod", "moral", "ruh hal", "keyf", "keyif"])
                .into_iter()
                .chain(axis_terms(Axis::Energy, &["enerji"]))
                .chain(axis_terms(
                    Axis::Anxiety,
                    &["kaygı", "endişe", "anksiyete", "stres", "gerginlik", "gerginliğ"],
                ))
                .collect(),
            level_terms: level_terms(DeclaredLevel::High, &["yüksek", "tavan", "full"], false)
                .into_iter()
                .chain(level_terms(DeclaredLevel::High, &["çok iyi", "yerinde"], true))
                .chain(level_terms(DeclaredLevel::Good, &["iyi", "güzel"], true))
                .chain(level_terms(
                    DeclaredLevel::Normal,
                    &["normal", "orta", "ortalama", "idare eder", "fena değil"],
                    false,
                ))
                .chain(level_terms(DeclaredLevel::Low, &["düşük", "dipte", "az"], false))
                .chain(level_terms(DeclaredLevel::Low, &["kötü", "bozuk"], true))
                .chain(level_terms(
                    DeclaredLevel::Zero,
                    &["sıfır", "yok", "bitti", "tükendi", "kalmadı"],
                    false,
                ))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_rows_are_in_range() {
        let lexicon = Lexicon::default();
        for pattern in &lexicon.patterns {
            assert!(!pattern.keywords.is_empty());
            assert!(pattern.weight > 0.0);
            for axis in Axis::ALL {
                assert!(pattern.impact.get(axis).abs() <= 5.0);
            }
        }
    }

    #[test]
    fn test_every_axis_has_terms() {
        let lexicon = Lexicon::default();
        for axis in Axis::ALL {
            assert!(lexicon.axis_terms.iter().any(|t| t.axis == axis));
        }
    }
}
