//! claimgraph CLI: run the claim analysis pipeline on stored cases.
//!
//! Usage:
//!   claimgraph case <create|list|delete|show|set|image> ...
//!   claimgraph extract <case> --claims <file|->
//!   claimgraph table <case> <show|tag|features|cell|add-row|remove-row|insert|remove> ...
//!   claimgraph graph <case> <build|show|add-node|remove-node|add-edge|remove-edge|legend> ...
//!   claimgraph markers <case>
//!   claimgraph cite <case>
//!   claimgraph summary <case> [--markdown]

use chrono::Local;
use clap::{Parser, Subcommand};
use claimgraph::case::fields;
use claimgraph::report::{cite_claim, ross_summary, summary_document};
use claimgraph::{
    CaseName, CaseSession, ChunkExtractor, ClaimGraphResult, ClaimId, Config, FeatureRow, Highlighter,
    JsonFileStore, OpenStore, RowTag, SqliteStore, StoreKind, Workbench,
};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::Level;

#[derive(Parser)]
#[command(
    name = "claimgraph",
    version,
    about = "Patent claim feature extraction, concept graphs and markers"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Path to a YAML config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Directory holding the case data (overrides the config)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
    /// Storage backend: json or sqlite (overrides the config)
    #[arg(long, global = true)]
    store: Option<StoreKind>,
    /// Log pipeline details to stderr (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage cases
    Case {
        #[command(subcommand)]
        action: CaseAction,
    },
    /// Extract features from a claim set, one claim per line
    Extract {
        /// Case name
        name: String,
        /// File with the claims, or - for stdin
        #[arg(long)]
        claims: String,
    },
    /// Inspect and tag the flattened feature table
    Table {
        /// Case name
        name: String,
        #[command(subcommand)]
        action: TableAction,
    },
    /// Build, inspect and edit the concept graph
    Graph {
        /// Case name
        name: String,
        #[command(subcommand)]
        action: GraphAction,
    },
    /// Generate and store markers from the saved graph
    Markers {
        /// Case name
        name: String,
    },
    /// Claim 1 with citation placeholders after each feature
    Cite {
        /// Case name
        name: String,
    },
    /// Print the case summary
    Summary {
        /// Case name
        name: String,
        /// Print the full summary document instead of the short summary
        #[arg(long)]
        markdown: bool,
    },
}

#[derive(Subcommand)]
enum CaseAction {
    /// Create a new case
    Create {
        /// Name for the new case
        name: String,
        /// Append a random suffix to the name
        #[arg(long)]
        unique: bool,
    },
    /// List all cases
    List,
    /// Delete a case and its image
    Delete {
        /// Name of the case to delete
        name: String,
    },
    /// Print the case record
    Show {
        /// Name of the case
        name: String,
    },
    /// Set a general information field
    Set {
        /// Name of the case
        name: String,
        /// Field name, e.g. Ptbs, "Technical Effect", "Prior Art"
        field: String,
        value: String,
    },
    /// Attach the application image
    Image {
        /// Name of the case
        name: String,
        /// Image file
        #[arg(required = true)]
        path: PathBuf,
    },
}

#[derive(Subcommand)]
enum TableAction {
    /// Print the flattened rows
    Show,
    /// Print the reviewed feature table
    Features,
    /// Set or clear one feature cell; re-flattening drops row tags
    Cell {
        /// Claim column, e.g. Cl_2 or 2
        claim: ClaimId,
        /// Feature row, starting at 0
        row: usize,
        /// New term; omit to clear the cell
        term: Option<String>,
    },
    /// Append a feature row, e.g. `add-row Cl_1="a seal" 2="a spring"`
    AddRow {
        /// Cells of the new row as CLAIM=TERM
        #[arg(value_parser = parse_cell)]
        cells: Vec<(ClaimId, String)>,
    },
    /// Remove a feature row
    RemoveRow {
        /// Feature row, starting at 0
        row: usize,
    },
    /// Insert a flattened row without a term before ROW
    Insert {
        /// Row index, as printed by `table show`
        row: usize,
        /// Edge label carried by the new row
        #[arg(long, default_value = "")]
        relation: String,
        /// Earlier feature the new row refers back to
        #[arg(long, default_value = "")]
        reference: String,
    },
    /// Remove a flattened row
    Remove {
        /// Row index, as printed by `table show`
        row: usize,
    },
    /// Tag one row with a relation label or a back-reference
    Tag {
        /// Row index, as printed by `table show`
        row: usize,
        /// Edge label carried by this row
        #[arg(long, conflicts_with = "reference", required_unless_present = "reference")]
        relation: Option<String>,
        /// Earlier feature this row refers back to
        #[arg(long)]
        reference: Option<String>,
    },
}

#[derive(Subcommand)]
enum GraphAction {
    /// Rebuild the graph from the feature table and save it
    Build,
    /// Print nodes and edges
    Show,
    /// Add a node
    AddNode { node: String },
    /// Remove a node and its edges
    RemoveNode { node: String },
    /// Add or relabel an edge
    AddEdge {
        from: String,
        to: String,
        #[arg(long, default_value = "")]
        label: String,
    },
    /// Remove an edge
    RemoveEdge { from: String, to: String },
    /// Print the claim color legend
    Legend,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load_config(cli: &Cli) -> Result<Config, String> {
    let mut config = match &cli.config {
        Some(path) => Config::load(path).map_err(|e| format!("{}: {}", path.display(), e))?,
        None => Config::default(),
    };
    if let Some(dir) = &cli.data_dir {
        config = config.with_data_dir(dir);
    }
    if let Some(store) = cli.store {
        config = config.with_store(store);
    }
    Ok(config)
}

fn open_workbench(config: &Config) -> Result<Workbench, String> {
    let bench = match config.store {
        StoreKind::Json => {
            let store = JsonFileStore::new(&config.data_dir)
                .map_err(|e| format!("Failed to open data directory: {}", e))?;
            Workbench::with_store(Arc::new(store))
        }
        StoreKind::Sqlite => {
            let store = SqliteStore::open(config.data_dir.join("claimgraph.db"))
                .map_err(|e| format!("Failed to open database: {}", e))?;
            Workbench::with_store(Arc::new(store))
        }
    };
    Ok(bench)
}

fn parse_cell(raw: &str) -> Result<(ClaimId, String), String> {
    let (claim, term) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected CLAIM=TERM, got '{}'", raw))?;
    Ok((claim.parse()?, term.trim().to_string()))
}

fn case_name(raw: &str) -> CaseName {
    CaseName::sanitize(raw, false)
}

fn report(result: ClaimGraphResult<()>) -> i32 {
    match result {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

/// Open a case, apply `f` and commit the session
fn with_session(
    bench: &Workbench,
    name: &str,
    f: impl FnOnce(&mut CaseSession) -> ClaimGraphResult<()>,
) -> ClaimGraphResult<()> {
    let mut session = bench.open(&case_name(name))?;
    f(&mut session)?;
    bench.commit(&session)
}

fn read_claims(source: &str) -> std::io::Result<String> {
    if source == "-" {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        Ok(text)
    } else {
        std::fs::read_to_string(source)
    }
}

// === case ===

fn cmd_case_create(bench: &Workbench, name: &str, unique: bool) -> i32 {
    match bench.create_case(name, unique) {
        Ok(created) => {
            println!("Created case '{}'", created);
            0
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

fn cmd_case_list(bench: &Workbench) -> i32 {
    let names = match bench.list_cases() {
        Ok(names) => names,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };
    if names.is_empty() {
        println!("No cases defined.");
        return 0;
    }
    println!("{:<32}  {:<10}  {:>6}", "NAME", "DATE", "CLAIMS");
    println!("{}", "-".repeat(52));
    for name in names {
        if let Ok(record) = bench.get_case(&name) {
            let claims = record.user_claims().ok().flatten().map_or(0, |c| c.len());
            println!(
                "{:<32}  {:<10}  {:>6}",
                name.as_str(),
                record.text(fields::DATE).unwrap_or("-"),
                claims
            );
        }
    }
    0
}

fn cmd_case_delete(bench: &Workbench, name: &str) -> i32 {
    let name = case_name(name);
    match bench.remove_case(&name) {
        Ok(true) => {
            println!("Deleted case '{}'", name);
            0
        }
        Ok(false) => {
            eprintln!("Error: case '{}' not found", name);
            1
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

fn cmd_case_show(bench: &Workbench, name: &str) -> i32 {
    report(bench.get_case(&case_name(name)).and_then(|record| {
        let text = serde_json::to_string_pretty(&record)?;
        println!("{}", text);
        Ok(())
    }))
}

fn cmd_case_set(bench: &Workbench, name: &str, field: &str, value: &str) -> i32 {
    let today = Local::now().date_naive();
    report(with_session(bench, name, |session| {
        session.set_general(field, value, today)?;
        println!("Updated '{}'", field);
        Ok(())
    }))
}

fn cmd_case_image(bench: &Workbench, name: &str, path: &Path) -> i32 {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => {
            eprintln!("Error: cannot read '{}': {}", path.display(), e);
            return 1;
        }
    };
    match bench.save_image(&case_name(name), &bytes) {
        Ok(reference) => {
            println!("Stored application image as {}", reference);
            0
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

// === pipeline ===

fn cmd_extract(bench: &Workbench, config: &Config, name: &str, claims: &str) -> i32 {
    let text = match read_claims(claims) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("Error: cannot read claims from '{}': {}", claims, e);
            return 1;
        }
    };
    let highlighter = Highlighter::new(config.highlight_open.as_str(), config.highlight_close.as_str());
    report(with_session(bench, name, |session| {
        let (extracted, table) = session.extract(&text, ChunkExtractor::shared(), &highlighter)?;
        if extracted.is_empty() {
            println!("No claims found.");
            return Ok(());
        }
        for (i, claim) in extracted.highlighted.iter().enumerate() {
            println!("Cl_{}: {}", i + 1, claim);
        }
        println!();
        print!("{}", table);
        Ok(())
    }))
}

fn cmd_table_show(bench: &Workbench, name: &str) -> i32 {
    report(bench.open(&case_name(name)).and_then(|session| {
        let table = session.flat_table()?;
        println!("{:>5}  {:<32}  {:<12}  {:<24}  {}", "INDEX", "A_LIST", "PREP_LIST", "THE_LIST", "CL_NR");
        for row in table.rows() {
            println!(
                "{:>5}  {:<32}  {:<12}  {:<24}  {}",
                row.index,
                row.term,
                row.relation_tag,
                row.reference_tag,
                row.claim_id.as_str()
            );
        }
        Ok(())
    }))
}

fn cmd_table_tag(bench: &Workbench, name: &str, row: usize, relation: Option<String>, reference: Option<String>) -> i32 {
    let tag = match (relation, reference) {
        (Some(label), _) => RowTag::Relation(label),
        (None, Some(term)) => RowTag::Reference(term),
        (None, None) => {
            eprintln!("Error: pass --relation or --reference");
            return 1;
        }
    };
    report(with_session(bench, name, |session| {
        session.tag_row(row, tag)?;
        println!("Tagged row {}", row);
        Ok(())
    }))
}

fn cmd_table_features(bench: &Workbench, name: &str) -> i32 {
    report(bench.open(&case_name(name)).and_then(|session| {
        print!("{}", session.feature_table()?);
        Ok(())
    }))
}

fn cmd_table_cell(bench: &Workbench, name: &str, claim: &ClaimId, row: usize, term: Option<String>) -> i32 {
    report(with_session(bench, name, |session| {
        let cleared = term.is_none();
        session.set_feature_cell(claim, row, term)?;
        if cleared {
            println!("Cleared {} row {}", claim, row);
        } else {
            println!("Updated {} row {}", claim, row);
        }
        Ok(())
    }))
}

fn cmd_table_add_row(bench: &Workbench, name: &str, cells: &[(ClaimId, String)]) -> i32 {
    report(with_session(bench, name, |session| {
        let row = session.add_feature_row(cells)?;
        println!("Added feature row {}", row);
        Ok(())
    }))
}

fn cmd_table_remove_row(bench: &Workbench, name: &str, row: usize) -> i32 {
    report(with_session(bench, name, |session| {
        session.remove_feature_row(row)?;
        println!("Removed feature row {}", row);
        Ok(())
    }))
}

fn cmd_table_insert(bench: &Workbench, name: &str, row: usize, relation: String, reference: String) -> i32 {
    report(with_session(bench, name, |session| {
        session.insert_row(row, FeatureRow::reference(reference).with_relation(relation))?;
        println!("Inserted row {}", row);
        Ok(())
    }))
}

fn cmd_table_remove(bench: &Workbench, name: &str, row: usize) -> i32 {
    report(with_session(bench, name, |session| {
        let removed = session.remove_row(row)?;
        println!("Removed row {} '{}'", row, removed.term);
        Ok(())
    }))
}

fn print_graph(session: &mut CaseSession, config: &Config) -> ClaimGraphResult<()> {
    let graph = session.graph(&config.palette)?;
    println!("Nodes ({}):", graph.node_count());
    for node in graph.nodes() {
        println!("  {} [{}]", node.id, node.color);
    }
    println!("Edges ({}):", graph.edge_count());
    for edge in graph.edges() {
        if edge.label.is_empty() {
            println!("  {} -> {}", edge.source, edge.target);
        } else {
            println!("  {} -> {} ({})", edge.source, edge.target, edge.label);
        }
    }
    Ok(())
}

fn cmd_graph(bench: &Workbench, config: &Config, name: &str, action: GraphAction) -> i32 {
    let palette = &config.palette;
    match action {
        GraphAction::Build => report(with_session(bench, name, |session| {
            session.build_graph(palette)?;
            session.save_network()?;
            print_graph(session, config)
        })),
        GraphAction::Show => report(bench.open(&case_name(name)).and_then(|mut session| print_graph(&mut session, config))),
        GraphAction::AddNode { node } => report(with_session(bench, name, |session| {
            if session.add_node(&node, palette)? {
                println!("Added node '{}'", node);
            } else {
                println!("Node '{}' already exists", node);
            }
            session.save_network()
        })),
        GraphAction::RemoveNode { node } => report(with_session(bench, name, |session| {
            session.remove_node(&node, palette)?;
            println!("Removed node '{}'", node);
            session.save_network()
        })),
        GraphAction::AddEdge { from, to, label } => report(with_session(bench, name, |session| {
            session.add_edge(&from, &to, &label, palette)?;
            println!("Added edge '{}' -> '{}'", from, to);
            session.save_network()
        })),
        GraphAction::RemoveEdge { from, to } => report(with_session(bench, name, |session| {
            session.remove_edge(&from, &to, palette)?;
            println!("Removed edge '{}' -> '{}'", from, to);
            session.save_network()
        })),
        GraphAction::Legend => report(bench.open(&case_name(name)).and_then(|session| {
            for entry in session.legend(palette)? {
                println!("{}: {}", entry.label, entry.color);
            }
            Ok(())
        })),
    }
}

fn cmd_markers(bench: &Workbench, config: &Config, name: &str) -> i32 {
    report(with_session(bench, name, |session| {
        let markers = session.generate_markers(&config.marker_prefix)?;
        println!("{}", markers.to_display_text());
        Ok(())
    }))
}

fn cmd_cite(bench: &Workbench, config: &Config, name: &str) -> i32 {
    match bench.get_case(&case_name(name)) {
        Ok(record) => match cite_claim(&record, &config.citation) {
            Some(text) => {
                println!("{}", text);
                0
            }
            None => {
                eprintln!("Error: claim 1 or its features are missing; run 'extract' first");
                1
            }
        },
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

fn cmd_summary(bench: &Workbench, name: &str, markdown: bool) -> i32 {
    let name = case_name(name);
    report(bench.get_case(&name).and_then(|record| {
        if markdown {
            let image = record.appl_image().map(str::to_string);
            let today = Local::now().date_naive();
            print!("{}", summary_document(&name, &record, image.as_deref(), today));
        } else {
            println!("{}", ross_summary(&record));
        }
        Ok(())
    }))
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    let bench = match open_workbench(&config) {
        Ok(bench) => bench,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let code = match cli.command {
        Commands::Case { action } => match action {
            CaseAction::Create { name, unique } => cmd_case_create(&bench, &name, unique),
            CaseAction::List => cmd_case_list(&bench),
            CaseAction::Delete { name } => cmd_case_delete(&bench, &name),
            CaseAction::Show { name } => cmd_case_show(&bench, &name),
            CaseAction::Set { name, field, value } => cmd_case_set(&bench, &name, &field, &value),
            CaseAction::Image { name, path } => cmd_case_image(&bench, &name, &path),
        },
        Commands::Extract { name, claims } => cmd_extract(&bench, &config, &name, &claims),
        Commands::Table { name, action } => match action {
            TableAction::Show => cmd_table_show(&bench, &name),
            TableAction::Features => cmd_table_features(&bench, &name),
            TableAction::Cell { claim, row, term } => cmd_table_cell(&bench, &name, &claim, row, term),
            TableAction::AddRow { cells } => cmd_table_add_row(&bench, &name, &cells),
            TableAction::RemoveRow { row } => cmd_table_remove_row(&bench, &name, row),
            TableAction::Insert {
                row,
                relation,
                reference,
            } => cmd_table_insert(&bench, &name, row, relation, reference),
            TableAction::Remove { row } => cmd_table_remove(&bench, &name, row),
            TableAction::Tag {
                row,
                relation,
                reference,
            } => cmd_table_tag(&bench, &name, row, relation, reference),
        },
        Commands::Graph { name, action } => cmd_graph(&bench, &config, &name, action),
        Commands::Markers { name } => cmd_markers(&bench, &config, &name),
        Commands::Cite { name } => cmd_cite(&bench, &config, &name),
        Commands::Summary { name, markdown } => cmd_summary(&bench, &name, markdown),
    };
    std::process::exit(code);
}
