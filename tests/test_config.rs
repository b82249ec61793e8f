use std::fs;

use far_west::config::GameConfig;

#[test]
fn defaults_match_the_arcade_tuning() {
    let c = GameConfig::default();
    assert_eq!((c.screen_width, c.screen_height), (1280.0, 860.0));
    assert_eq!(c.enemy_count, 5);
    assert_eq!(c.cactus_count, 60);
    assert_eq!(c.player_health, 100);
    assert_eq!(c.enemy_health, 30);
    assert_eq!(c.animation_speed, 15);
    assert_eq!(c.max_frame_count, 60);
    assert_eq!(c.seed, None);
}

#[test]
fn partial_json_keeps_other_defaults() {
    let c = GameConfig::from_json(r#"{ "enemy_count": 2, "seed": 9 }"#).unwrap();
    assert_eq!(c.enemy_count, 2);
    assert_eq!(c.seed, Some(9));
    assert_eq!(c.cactus_count, 60);
    assert_eq!(c.bullet_speed, 6.0);
}

#[test]
fn invalid_json_is_an_error() {
    assert!(GameConfig::from_json("{ enemy_count: }").is_err());
    assert!(GameConfig::from_json(r#"{ "enemy_count": "many" }"#).is_err());
}

#[test]
fn validated_clamps_degenerate_values() {
    let c = GameConfig {
        animation_speed: 0,
        max_frame_count: 0,
        player_health: 0,
        enemy_health: 0,
        screen_width: 0.0,
        ..GameConfig::default()
    }
    .validated();
    assert_eq!(c.animation_speed, 1);
    assert_eq!(c.max_frame_count, 2);
    assert_eq!(c.player_health, 1);
    assert_eq!(c.enemy_health, 1);
    assert_eq!(c.screen_width, 1.0);
    assert_eq!(c.screen_height, 860.0);
}

#[test]
fn validated_leaves_sane_values_alone() {
    assert_eq!(GameConfig::default().validated(), GameConfig::default());
}

#[test]
fn load_reads_a_file() {
    let path = std::env::temp_dir().join(format!("far_west_config_{}.json", std::process::id()));
    fs::write(&path, r#"{ "cactus_count": 7 }"#).unwrap();
    let c = GameConfig::load(&path).unwrap();
    fs::remove_file(&path).unwrap();
    assert_eq!(c.cactus_count, 7);
}

#[test]
fn load_reports_missing_file() {
    let err = GameConfig::load("/definitely/not/here.json").unwrap_err();
    assert!(err.to_string().contains("when loading config file"));
}
