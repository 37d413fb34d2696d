use std::collections::BTreeMap;
use std::path::Path;

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sc_simulation::{HeldKeys, SimConfig, SimEventKind, Simulation};

/// Flags of `sc run`.
pub struct RunOptions {
    pub ticks: u64,
    pub scene: Option<String>,
    pub keys: Vec<String>,
    pub random_keys: Option<String>,
    pub seed: u64,
    pub frame_ms: f64,
    pub verbose: bool,
}

/// A key held over a range of ticks (1-based, end exclusive).
#[derive(Debug, Clone, PartialEq)]
struct KeyHold {
    code: String,
    start: u64,
    end: u64,
}

impl KeyHold {
    /// Parse `CODE@START..END` or `CODE@TICK`.
    fn parse(spec: &str) -> Result<Self, String> {
        let (code, range) = spec
            .rsplit_once('@')
            .ok_or_else(|| format!("invalid key spec \"{spec}\". Use CODE@START..END or CODE@TICK"))?;
        if code.is_empty() {
            return Err(format!("key spec \"{spec}\" has no key code"));
        }
        let tick = |s: &str| {
            s.trim()
                .parse::<u64>()
                .map_err(|_| format!("invalid tick \"{s}\" in key spec \"{spec}\""))
        };
        let (start, end) = match range.split_once("..") {
            Some((start, end)) => (tick(start)?, tick(end)?),
            None => {
                let at = tick(range)?;
                (at, at + 1)
            }
        };
        if end <= start {
            return Err(format!("key spec \"{spec}\" covers no ticks"));
        }
        Ok(Self {
            code: code.to_string(),
            start,
            end,
        })
    }

    fn covers(&self, tick: u64) -> bool {
        (self.start..self.end).contains(&tick)
    }
}

pub fn run(file: &Path, opts: &RunOptions) -> Result<(), String> {
    let mut project = super::load_project(file)?;
    if let Some(scene) = &opts.scene {
        let id = project
            .find_scene(scene)
            .map_err(|e| e.to_string())?
            .id
            .clone();
        project.current_scene_id = id;
    }
    if opts.frame_ms <= 0.0 {
        return Err(format!("--frame-ms must be positive, got {}", opts.frame_ms));
    }

    let holds = opts
        .keys
        .iter()
        .map(|s| KeyHold::parse(s))
        .collect::<Result<Vec<_>, _>>()?;
    let random: Vec<&str> = opts
        .random_keys
        .as_deref()
        .map(|s| s.split(',').map(str::trim).filter(|k| !k.is_empty()).collect())
        .unwrap_or_default();
    let mut rng = StdRng::seed_from_u64(opts.seed);

    let config = SimConfig::default().with_frame_ms(opts.frame_ms);
    let mut sim =
        Simulation::new(project, config).map_err(|e| format!("cannot start simulation: {e}"))?;

    for _ in 0..opts.ticks {
        let tick = sim.current_tick() + 1;
        let mut keys = HeldKeys::new();
        for hold in holds.iter().filter(|h| h.covers(tick)) {
            keys.press(hold.code.clone());
        }
        for code in &random {
            if rng.random_bool(0.5) {
                keys.press(*code);
            }
        }
        sim.step(&keys)
            .map_err(|e| format!("simulation error at tick {tick}: {e}"))?;
    }

    print_header(&sim, opts);
    if opts.verbose {
        print_events(&sim);
    } else {
        print_summary(&sim);
    }
    print_instances(&sim);
    print_variables(&sim);
    Ok(())
}

fn print_header(sim: &Simulation, opts: &RunOptions) {
    let scene = sim
        .project()
        .scene(sim.scene_id())
        .map_or(sim.scene_id(), |s| s.name.as_str());
    println!(
        "  {} '{}' {}",
        "Run".bold(),
        sim.project().name(),
        format!(
            "({} ticks at {}ms, seed={})",
            opts.ticks, opts.frame_ms, opts.seed
        )
        .dimmed()
    );
    println!(
        "  Scene: {scene}, {} instances live, {} events logged",
        sim.stage().instances.len(),
        sim.events().len()
    );
    if let Some(pending) = sim.pending_scene() {
        println!("  Pending switch to scene '{pending}'");
    }
    println!();
}

fn print_events(sim: &Simulation) {
    println!("  {}", "Event Log".bold().underline());
    println!();
    for event in sim.events().events() {
        let tick_label = format!("[tick {:>4}]", event.tick).dimmed();
        let desc = colorize_event(&event.kind, &event.description);
        println!("  {tick_label} {desc}");
    }
    if sim.events().is_empty() {
        println!("  {}", "(no events)".dimmed());
    }
    println!();
}

fn print_summary(sim: &Simulation) {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for event in sim.events().events() {
        *counts.entry(event.kind.label()).or_default() += 1;
    }
    if counts.is_empty() {
        return;
    }
    println!("  {}", "Event Summary".bold().underline());
    for (label, count) in &counts {
        println!("  {count:>6}  {label}");
    }
    println!();

    let notable: Vec<_> = sim
        .events()
        .events()
        .iter()
        .filter(|e| {
            matches!(
                e.kind,
                SimEventKind::SceneSwitchRequested { .. } | SimEventKind::SceneNotFound { .. }
            )
        })
        .collect();
    if !notable.is_empty() {
        println!("  {}", "Scene Changes".bold().underline());
        for event in notable {
            let desc = colorize_event(&event.kind, &event.description);
            println!("  [tick {:>4}] {desc}", event.tick);
        }
        println!();
    }
}

fn print_instances(sim: &Simulation) {
    let frame = sim.frame();
    println!("  {}", "Instances".bold().underline());
    if frame.instances.is_empty() {
        println!("  {}", "(none)".dimmed());
        println!();
        return;
    }
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        "Name", "Type", "Position", "Rotation", "Animation", "Variables",
    ]);
    for inst in &frame.instances {
        let animation = inst
            .animation
            .as_ref()
            .map_or_else(|| "-".to_string(), |a| format!("{a} #{}", inst.frame));
        let mut name = inst.name.clone();
        if inst.invincible {
            name.push_str(" (invincible)");
        }
        table.add_row(vec![
            name,
            inst.kind.clone(),
            format!("{:.1}, {:.1}", inst.x, inst.y),
            format!("{:.0}", inst.rotation),
            animation,
            inst.variables
                .iter()
                .map(|(k, v)| format!("{k}={v}"))
                .collect::<Vec<_>>()
                .join(" "),
        ]);
    }
    println!("{table}");
    println!();
}

fn print_variables(sim: &Simulation) {
    let vars: Vec<_> = sim.stage().variables.iter().collect();
    if vars.is_empty() {
        return;
    }
    println!("  {}", "Variables".bold().underline());
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Name", "Value"]);
    for (id, value) in vars {
        table.add_row(vec![
            super::variable_name(sim.project(), id).to_string(),
            value.to_string(),
        ]);
    }
    println!("{table}");
    println!();
}

fn colorize_event(kind: &SimEventKind, description: &str) -> colored::ColoredString {
    match kind {
        SimEventKind::SceneLoaded { .. } | SimEventKind::SceneSwitchRequested { .. } => {
            description.cyan()
        }
        SimEventKind::SceneNotFound { .. } => description.red(),
        SimEventKind::DamageFeedback { .. } | SimEventKind::HitStop { .. } => {
            description.yellow()
        }
        SimEventKind::Spawned { .. } | SimEventKind::Recycled { .. } => description.blue(),
        SimEventKind::SoundTriggered { .. } | SimEventKind::MusicChanged { .. } => {
            description.green()
        }
        SimEventKind::AnimationChanged { .. } => description.normal(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_range_and_single_tick() {
        assert_eq!(
            KeyHold::parse("ArrowRight@1..30").unwrap(),
            KeyHold {
                code: "ArrowRight".into(),
                start: 1,
                end: 30,
            }
        );
        let jump = KeyHold::parse("Space@12").unwrap();
        assert!(jump.covers(12));
        assert!(!jump.covers(13));
    }

    #[test]
    fn rejects_bad_specs() {
        assert!(KeyHold::parse("Space").is_err());
        assert!(KeyHold::parse("@3").is_err());
        assert!(KeyHold::parse("x@5..5").is_err());
        assert!(KeyHold::parse("x@a..b").is_err());
    }

    #[test]
    fn at_sign_key_uses_last_separator() {
        let hold = KeyHold::parse("@@2").unwrap();
        assert_eq!(hold.code, "@");
    }
}
