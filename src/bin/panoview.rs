use std::collections::BTreeSet;
use std::path::PathBuf;
use std::rc::Rc;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use panoview::host::headless::{
    HeadlessBackend, RecordingEffect, StaticDevice, StaticScene, StaticVisibility, as_recording,
};
use panoview::{
    EffectPipelineCompiler, EffectRegistry, FxConfig, MediaDescriptor, MediaResolver,
    PipelineStage, ViewerContext, VisibilityState,
};

#[derive(Parser, Debug)]
#[command(name = "panoview", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Dry-run media resolution against a headless backend.
    Media(MediaArgs),
    /// Compile effect sets against recording effects and print the bound uniforms.
    Fx(FxArgs),
}

#[derive(Parser, Debug)]
struct MediaArgs {
    /// Input media descriptor JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Device tags the simulated device supports (repeatable).
    #[arg(long = "device")]
    devices: Vec<String>,

    /// Simulate a hidden page (suppresses autoplay).
    #[arg(long)]
    hidden: bool,

    /// Mark the media as a sound target of an ambisonic scene.
    #[arg(long)]
    ambisonic: bool,

    /// Leave sources pending instead of reporting loaded immediately.
    #[arg(long)]
    no_autofire: bool,
}

#[derive(Parser, Debug)]
struct FxArgs {
    /// Input fx config JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Compile only this set (default: every set).
    #[arg(long)]
    set: Option<String>,

    /// Effect types known to the catalog (repeatable, default: every type in the config).
    #[arg(long = "effect")]
    effects: Vec<String>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Media(args) => cmd_media(args),
        Command::Fx(args) => cmd_fx(args),
    }
}

fn cmd_media(args: MediaArgs) -> anyhow::Result<()> {
    let desc = MediaDescriptor::from_path(&args.in_path)
        .with_context(|| format!("load media descriptor '{}'", args.in_path.display()))?;
    if let Err(e) = desc.validate() {
        eprintln!("warning: {e}");
    }

    let backend = Rc::new(if args.no_autofire {
        HeadlessBackend::new()
    } else {
        HeadlessBackend::auto_firing()
    });
    let scene = StaticScene {
        sound_targets: if args.ambisonic {
            BTreeSet::from([desc.uid.clone()])
        } else {
            BTreeSet::new()
        },
        ambisonic: args.ambisonic,
    };
    let visibility = if args.hidden {
        VisibilityState::Hidden
    } else {
        VisibilityState::Visible
    };
    let ctx = ViewerContext::new(
        backend.clone(),
        Rc::new(StaticDevice::new(args.devices)),
        Rc::new(scene),
        Rc::new(StaticVisibility(visibility)),
    );

    let resolver = MediaResolver::new(&ctx, Some(desc)).context("resolve media")?;

    println!("uid: {}", resolver.uid().unwrap_or("-"));
    println!("type: {:?}", resolver.media_type());
    println!("state: {:?}", resolver.state());
    match resolver.display_object() {
        Some(id) => println!("display_object: {}", id.0),
        None => println!("display_object: -"),
    }
    for src in backend.created() {
        println!("source {:?}", src.kind);
        for call in src.calls() {
            println!("  {call:?}");
        }
    }
    Ok(())
}

fn cmd_fx(args: FxArgs) -> anyhow::Result<()> {
    let config = FxConfig::from_path(&args.in_path)
        .with_context(|| format!("load fx config '{}'", args.in_path.display()))?;
    config.validate()?;

    let names: BTreeSet<String> = if args.effects.is_empty() {
        config
            .fx_sets
            .iter()
            .flat_map(|s| s.set.iter().map(|d| d.effect_type.clone()))
            .collect()
    } else {
        args.effects.into_iter().collect()
    };
    let mut registry = EffectRegistry::new();
    for name in names {
        let ctor_name = name.clone();
        registry.register(name, move || Box::new(RecordingEffect::new(ctor_name.clone())));
    }

    let mut compiler = EffectPipelineCompiler::new(Rc::new(registry));
    compiler.add_config(config);

    let uids: Vec<String> = match args.set {
        Some(uid) => vec![uid],
        None => compiler.set_uids().map(str::to_owned).collect(),
    };
    for uid in uids {
        let stages = compiler
            .compile_set(&uid)?
            .with_context(|| format!("no effect set '{uid}'"))?;
        println!("set {uid}: {} stage(s)", stages.len());
        for stage in &stages {
            print_stage(stage)?;
        }
    }
    Ok(())
}

fn print_stage(stage: &PipelineStage) -> anyhow::Result<()> {
    println!("  {} ({})", stage.uid(), stage.type_name());
    if let Some(fx) = as_recording(stage.effect()) {
        for (name, value) in fx.uniforms() {
            println!("    {name} = {}", serde_json::to_string(value)?);
        }
    }
    Ok(())
}
