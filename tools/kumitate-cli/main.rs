use async_trait::async_trait;
use clap::{Parser, Subcommand};
use kumitate::prelude::*;
use kumitate::registry;
use serde::Deserialize;
use serde_json::{Value, json};
use std::fs;
use std::time::Instant;

// --- JSON Deserialization Structs (Input Format Specific) ---
// The selections format is CLI-only: picks reference catalog ids printed
// by `analyze` and carry the exposed display name.

#[derive(Deserialize)]
struct RawSelections {
    name: String,
    #[serde(default)]
    icon: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    inputs: Vec<RawPick>,
    #[serde(default)]
    controls: Vec<RawPick>,
}

#[derive(Deserialize)]
struct RawPick {
    /// Catalog id from `analyze`, e.g. "n2-aspectRatio".
    id: String,
    /// Display name to expose the item under.
    name: String,
}

/// A compound workflow composition and execution engine CLI
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the exposable surface of a workflow JSON file
    Analyze {
        /// Path to the workflow JSON file (nodes and edges)
        workflow_path: String,
    },
    /// Build a compound definition from a workflow and a selections file
    Build {
        workflow_path: String,
        selections_path: String,
        /// Where to write the definition JSON (stdout when omitted)
        #[arg(short, long)]
        out: Option<String>,
    },
    /// Dry-run a definition with placeholder generation outputs
    Run {
        definition_path: String,
        /// JSON object of external input values keyed by exposed id
        #[arg(short, long)]
        inputs: Option<String>,
        /// JSON object of control values keyed by exposed id
        #[arg(short, long)]
        controls: Option<String>,
    },
}

fn main() {
    let cli = Cli::parse();
    match cli.command {
        Command::Analyze { workflow_path } => run_analyze(&workflow_path),
        Command::Build {
            workflow_path,
            selections_path,
            out,
        } => run_build(&workflow_path, &selections_path, out.as_deref()),
        Command::Run {
            definition_path,
            inputs,
            controls,
        } => run_dry_run(&definition_path, inputs.as_deref(), controls.as_deref()),
    }
}

fn run_analyze(workflow_path: &str) {
    let workflow = load_workflow(workflow_path);
    let analysis = analyze_workflow(&workflow);

    println!("Inputs ({}):", analysis.available_inputs.len());
    for input in &analysis.available_inputs {
        println!(
            "  {:<28} {:<22} {:?} ({})",
            input.id, input.suggested_name, input.kind, input.param
        );
    }
    println!("Controls ({}):", analysis.available_controls.len());
    for control in &analysis.available_controls {
        println!(
            "  {:<28} {:<22} ({})",
            control.id, control.suggested_name, control.param
        );
    }
    println!("Outputs ({}):", analysis.available_outputs.len());
    for output in &analysis.available_outputs {
        println!(
            "  {:<28} {:<22} {:?} ({})",
            output.id, output.suggested_name, output.kind, output.param
        );
    }
}

fn run_build(workflow_path: &str, selections_path: &str, out: Option<&str>) {
    let workflow = load_workflow(workflow_path);
    let selections_json = fs::read_to_string(selections_path).unwrap_or_else(|e| {
        exit_with_error(&format!(
            "Failed to read selections file '{}': {}",
            selections_path, e
        ))
    });
    let selections: RawSelections = serde_json::from_str(&selections_json)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to parse selections JSON: {}", e)));

    let analysis = analyze_workflow(&workflow);
    let mut builder = DefinitionBuilder::new(&selections.name, workflow)
        .icon(&selections.icon)
        .description(&selections.description);

    for pick in &selections.inputs {
        let available = analysis
            .available_inputs
            .iter()
            .find(|i| i.id == pick.id)
            .unwrap_or_else(|| {
                exit_with_error(&format!("No exposable input with id '{}'", pick.id))
            });
        builder = builder.expose_input(InputSelection::from_available(available, &pick.name));
    }
    for pick in &selections.controls {
        let available = analysis
            .available_controls
            .iter()
            .find(|c| c.id == pick.id)
            .unwrap_or_else(|| {
                exit_with_error(&format!("No exposable control with id '{}'", pick.id))
            });
        builder = builder.expose_control(ControlSelection::from_available(available, &pick.name));
    }

    let build_start = Instant::now();
    let definition = builder
        .build()
        .unwrap_or_else(|e| exit_with_error(&format!("Build failed: {}", e)));
    println!(
        "Built definition '{}' ({} inputs, {} controls, {} outputs) in {:?}",
        definition.id,
        definition.inputs.len(),
        definition.controls.len(),
        definition.outputs.len(),
        build_start.elapsed()
    );

    let definition_json = serde_json::to_string_pretty(&definition)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to serialize definition: {}", e)));
    match out {
        Some(path) => {
            fs::write(path, definition_json).unwrap_or_else(|e| {
                exit_with_error(&format!("Failed to write '{}': {}", path, e))
            });
            println!("Wrote {}", path);
        }
        None => println!("{}", definition_json),
    }
}

fn run_dry_run(definition_path: &str, inputs_path: Option<&str>, controls_path: Option<&str>) {
    let definition_json = fs::read_to_string(definition_path).unwrap_or_else(|e| {
        exit_with_error(&format!(
            "Failed to read definition file '{}': {}",
            definition_path, e
        ))
    });
    let definition = CompoundDefinition::from_json(&definition_json)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to parse definition: {}", e)));
    let instance = definition.instantiate();

    let external_inputs = load_value_map(inputs_path);
    let mut control_values = instance.control_values.clone();
    control_values.extend(load_value_map(controls_path));

    let runtime = tokio::runtime::Builder::new_current_thread()
        .build()
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to start runtime: {}", e)));

    let run_start = Instant::now();
    let result = runtime.block_on(execute_instance(
        &instance,
        &external_inputs,
        &control_values,
        &DryRunExecutor,
        NestingDepth::default(),
    ));

    match result {
        Ok(outputs) => {
            println!("Dry run finished in {:?}", run_start.elapsed());
            let rendered: Value = outputs.into_iter().collect::<serde_json::Map<_, _>>().into();
            println!(
                "{}",
                serde_json::to_string_pretty(&rendered).unwrap_or_default()
            );
        }
        Err(e) => exit_with_error(&format!("Execution failed: {}", e)),
    }
}

/// Fills every generation output with a placeholder instead of calling
/// real generation services; compound nodes recurse as usual.
struct DryRunExecutor;

#[async_trait]
impl GraphExecutor for DryRunExecutor {
    async fn execute(
        &self,
        mut nodes: Vec<GraphNode>,
        _edges: Vec<GraphEdge>,
        depth: NestingDepth,
    ) -> GraphRunResult {
        for node in &mut nodes {
            if node.kind == NodeKind::Compound {
                let Some(instance) = CompoundInstance::from_node(node) else {
                    continue;
                };
                let inputs = AHashMap::new();
                let controls = instance.control_values.clone();
                match execute_instance(&instance, &inputs, &controls, self, depth).await {
                    Ok(outputs) => {
                        for (id, value) in outputs {
                            node.set_value_at(&format!("data.outputs.{id}"), value);
                        }
                    }
                    Err(e) => return GraphRunResult::failed(e.to_string()),
                }
            } else if let Some(connector) =
                registry::node_declarations(node).and_then(|d| d.generation_output)
            {
                let placeholder = json!(format!("dryrun://{}/{}", node.id, connector));
                node.set_value_at(&format!("data.outputs.{connector}"), placeholder);
            }
        }
        GraphRunResult::ok(nodes)
    }
}

fn load_workflow(path: &str) -> Workflow {
    let workflow_json = fs::read_to_string(path)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to read workflow '{}': {}", path, e)));
    serde_json::from_str(&workflow_json)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to parse workflow JSON: {}", e)))
}

fn load_value_map(path: Option<&str>) -> AHashMap<String, Value> {
    let Some(path) = path else {
        return AHashMap::new();
    };
    let map_json = fs::read_to_string(path)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to read '{}': {}", path, e)));
    serde_json::from_str(&map_json)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to parse '{}': {}", path, e)))
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
