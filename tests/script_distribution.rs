use std::fs;

use anyhow::Result;
use slidesync::config::TextConfig;
use slidesync::script::{clean_script_lines, load_script};
use slidesync::{DistributionMethod, InputError, ScriptOptimizer};
use tempfile::tempdir;

fn narration() -> Vec<String> {
    let paragraph = [
        "Welcome to this short introduction to the product.",
        "It was built to help small teams ship faster.",
        "Now let us look at how the system is put together.",
        "Every request passes through a single process.",
        "The method is simple and the algorithm is fast.",
        "Next we cover the benefits for your team.",
        "You will improve turnaround and enhance quality.",
        "Better tooling makes the work more enjoyable.",
        "Finally, a quick summary of what we covered.",
        "Thank you for watching until the end.",
    ];
    paragraph.iter().map(|line| line.to_string()).collect()
}

#[test]
fn every_slide_count_gets_exactly_that_many_texts() {
    let optimizer = ScriptOptimizer::new(TextConfig::default());
    let lines = narration();
    for slides in 1..=25 {
        let settings = optimizer
            .optimize_distribution(&lines, slides)
            .unwrap()
            .unwrap();
        assert_eq!(settings.texts.len(), slides);
        assert_eq!(settings.slide_count(), slides);
    }
}

#[test]
fn merged_slides_keep_every_word_in_order() {
    let optimizer = ScriptOptimizer::new(TextConfig::default());
    let lines = narration();
    for slides in 1..=10 {
        let settings = optimizer
            .optimize_distribution(&lines, slides)
            .unwrap()
            .unwrap();
        let joined: Vec<String> = settings
            .texts
            .iter()
            .flat_map(|text| text.split_whitespace())
            .map(str::to_string)
            .collect();
        let original: Vec<String> = lines
            .iter()
            .flat_map(|line| line.split_whitespace())
            .map(str::to_string)
            .collect();
        if settings.method != DistributionMethod::SemanticGrouping {
            assert_eq!(joined, original, "{} slides", slides);
        }
    }
}

#[test]
fn many_short_lines_use_semantic_grouping() {
    let optimizer = ScriptOptimizer::new(TextConfig::default());
    let lines: Vec<String> = (0..33)
        .map(|idx| match idx % 3 {
            0 => format!("Welcome item {idx}"),
            1 => format!("System item {idx}"),
            _ => format!("Plain item {idx}"),
        })
        .collect();
    let settings = optimizer.optimize_distribution(&lines, 3).unwrap().unwrap();
    assert_eq!(settings.method, DistributionMethod::SemanticGrouping);
    assert!(settings.texts[0].starts_with("Welcome item 0 Welcome item 3"));
    assert!(settings.texts[2].ends_with("Plain item 32"));
}

#[test]
fn zero_slides_is_an_input_error() {
    let optimizer = ScriptOptimizer::new(TextConfig::default());
    assert_eq!(
        optimizer.optimize_distribution(&narration(), 0),
        Err(InputError::ZeroSlides)
    );
}

#[test]
fn json_script_feeds_the_optimizer() -> Result<()> {
    let temp = tempdir()?;
    let path = temp.path().join("script.json");
    fs::write(
        &path,
        r#"{"texts": ["First slide text here", "---", "Second slide text here"]}"#,
    )?;

    let lines = load_script(&path)?;
    assert_eq!(clean_script_lines(&lines).len(), 2);

    let settings = ScriptOptimizer::new(TextConfig::default())
        .optimize_distribution(&lines, 2)?
        .expect("script has content");
    assert_eq!(
        settings.texts,
        vec!["First slide text here", "Second slide text here"]
    );
    Ok(())
}
