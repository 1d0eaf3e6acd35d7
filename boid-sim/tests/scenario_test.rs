use anyhow::Result;
use boid_shared::{BoidSettings, Position, SettingsUpdate, SpawnRequest};
use boid_sim::{SimConfig, Simulation};
use serde_json::Value;

fn frames(output: &[u8]) -> Result<Vec<Value>> {
    let text = std::str::from_utf8(output)?;
    let mut frames = Vec::new();
    for line in text.lines() {
        frames.push(serde_json::from_str(line)?);
    }
    Ok(frames)
}

#[test]
fn test_scenario_parses_with_partial_fields() -> Result<()> {
    let config = SimConfig::from_json_str(
        r#"{
            "max_population": 12,
            "initial_population": 4,
            "seed": 3,
            "settings": { "cohesion_weight": 0.9 },
            "spawns": [{ "step": 2, "position": { "x": 0.25, "y": 0.75 } }]
        }"#,
    )?;

    assert_eq!(config.max_population, 12);
    assert_eq!(config.settings.cohesion_weight, 0.9);
    assert_eq!(config.settings.move_speed, BoidSettings::default().move_speed);
    assert_eq!(config.spawns.len(), 1);
    assert_eq!(config.delta_time, SimConfig::default().delta_time);
    Ok(())
}

#[test]
fn test_invalid_settings_fail_startup() {
    let config = SimConfig {
        settings: BoidSettings {
            sensor_ray_count: 0,
            ..BoidSettings::default()
        },
        ..SimConfig::default()
    };

    let err = Simulation::new(&config).err().expect("startup should fail");
    let message = format!("{:#}", err);
    assert!(message.contains("sensor_ray_count"), "unexpected error: {message}");
}

#[test]
fn test_malformed_json_is_an_error() {
    assert!(SimConfig::from_json_str("{ not json").is_err());
    assert!(SimConfig::from_json_str(r#"{ "delta_time": -1.0 }"#).is_err());
}

#[test]
fn test_run_writes_frames_and_keeps_agents_in_world() -> Result<()> {
    let config = SimConfig {
        max_population: 30,
        initial_population: 20,
        seed: Some(42),
        steps: 40,
        snapshot_every: Some(10),
        ..SimConfig::default()
    };
    let mut simulation = Simulation::new(&config)?;

    let mut output = Vec::new();
    simulation.run(config.steps, config.snapshot_every, &mut output)?;

    let frames = frames(&output)?;
    assert_eq!(frames.len(), 4);
    let ticks: Vec<u64> = frames
        .iter()
        .map(|frame| frame["status"]["tick"].as_u64().unwrap())
        .collect();
    assert_eq!(ticks, vec![10, 20, 30, 40]);

    let last = frames.last().unwrap();
    let agents = last["agents"].as_array().unwrap();
    assert_eq!(agents.len(), 20);
    for agent in agents {
        let x = agent["position"]["x"].as_f64().unwrap();
        let y = agent["position"]["y"].as_f64().unwrap();
        assert!((-8.0..=8.0).contains(&x), "x = {x}");
        assert!((-5.0..=5.0).contains(&y), "y = {y}");
    }
    Ok(())
}

#[test]
fn test_same_seed_gives_same_run() -> Result<()> {
    let config = SimConfig {
        initial_population: 15,
        seed: Some(9),
        steps: 25,
        ..SimConfig::default()
    };

    let mut first = Vec::new();
    Simulation::new(&config)?.run(config.steps, None, &mut first)?;
    let mut second = Vec::new();
    Simulation::new(&config)?.run(config.steps, None, &mut second)?;

    assert_eq!(first, second);
    Ok(())
}

#[test]
fn test_scheduled_spawns_respect_cap() -> Result<()> {
    let config = SimConfig::from_json_str(
        r#"{
            "max_population": 3,
            "initial_population": 2,
            "seed": 1,
            "steps": 5,
            "spawns": [
                { "step": 1, "position": { "x": 0.5, "y": 0.5 } },
                { "step": 2, "position": { "x": 0.1, "y": 0.9 } }
            ]
        }"#,
    )?;
    let mut simulation = Simulation::new(&config)?;

    let mut output = Vec::new();
    simulation.run(config.steps, None, &mut output)?;

    let status = simulation.status();
    assert_eq!(status.boid_count, 3);
    assert_eq!(status.max_population, 3);
    assert_eq!(status.tick, 5);
    Ok(())
}

#[test]
fn test_rejected_settings_update_keeps_previous() -> Result<()> {
    let config = SimConfig {
        initial_population: 0,
        seed: Some(4),
        ..SimConfig::default()
    };
    let mut simulation = Simulation::new(&config)?;

    let good = SettingsUpdate {
        settings: BoidSettings {
            move_speed: 9.0,
            ..BoidSettings::default()
        },
    };
    simulation.handle_settings(&good)?;
    assert_eq!(simulation.flock().params().move_speed(), 9.0);

    let bad = SettingsUpdate {
        settings: BoidSettings {
            move_speed: 1.0,
            alignment_weight: 2.0,
            ..BoidSettings::default()
        },
    };
    assert!(simulation.handle_settings(&bad).is_err());
    assert_eq!(simulation.flock().params().move_speed(), 9.0);
    Ok(())
}

#[test]
fn test_scheduled_change_keeps_untouched_settings() -> Result<()> {
    let config = SimConfig::from_json_str(include_str!("../scenarios/default.json"))?;
    let mut simulation = Simulation::new(&config)?;

    for _ in 0..300 {
        simulation.step()?;
    }
    let params = simulation.flock().params();
    assert_eq!(params.separation_weight(), 0.6);
    assert_eq!(params.cohesion_weight(), 0.4);
    assert_eq!(params.move_speed(), 5.0);

    // the change scheduled for step 300 lands before that tick runs
    simulation.step()?;
    let params = simulation.flock().params();
    assert_eq!(params.move_speed(), 8.0);
    assert_eq!(params.rotation_speed(), 540.0);
    assert_eq!(params.separation_weight(), 0.6);
    assert_eq!(params.alignment_weight(), 0.5);
    assert_eq!(params.cohesion_weight(), 0.4);
    Ok(())
}

#[test]
fn test_rejected_scheduled_change_keeps_settings() -> Result<()> {
    let config = SimConfig::from_json_str(
        r#"{
            "initial_population": 3,
            "seed": 5,
            "settings": { "move_speed": 6.0 },
            "settings_changes": [
                { "step": 1, "settings": { "move_speed": 7.0, "sensor_range": 99.0 } }
            ]
        }"#,
    )?;
    let mut simulation = Simulation::new(&config)?;

    simulation.step()?;
    simulation.step()?;

    assert_eq!(simulation.flock().params().move_speed(), 6.0);
    assert_eq!(simulation.flock().tick_count(), 2);
    Ok(())
}

#[test]
fn test_handle_spawn_returns_none_when_full() -> Result<()> {
    let config = SimConfig {
        max_population: 1,
        initial_population: 0,
        seed: Some(8),
        ..SimConfig::default()
    };
    let mut simulation = Simulation::new(&config)?;
    let request = SpawnRequest {
        position: Position::new(0.5, 0.5),
    };

    assert!(simulation.handle_spawn(request).is_some());
    assert!(simulation.handle_spawn(request).is_none());
    assert_eq!(simulation.snapshot().len(), 1);
    Ok(())
}
