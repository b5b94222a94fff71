// file: src/main.rs
// description: commandline application entry point with command handling
// reference: application bootstrap and orchestration

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use stackform::utils::logging::{format_info, format_step, format_success};
use stackform::{
    CloudProvider, Config, FolderPublisher, ResourceKind, Stack, Validator, remap_folder_with,
    stack::{iam, lambda, objects},
};
use std::path::PathBuf;
use std::time::Instant;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "stackform")]
#[command(version = "0.1.0")]
#[command(about = "Declarative resource deployment for local cloud emulation endpoints", long_about = None)]
struct Cli {
    #[arg(
        short,
        long,
        value_name = "FILE",
        default_value = "config/default.toml"
    )]
    config: PathBuf,

    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    color: bool,

    #[arg(short, long, action = ArgAction::SetTrue)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Declare the whole stack: IAM, function, bucket and replicated objects
    Deploy {
        #[arg(long)]
        skip_replication: bool,
    },

    /// Replicate a local directory into the bucket, nothing else
    Sync {
        #[arg(long, value_name = "DIR")]
        dir: Option<PathBuf>,

        #[arg(long)]
        bucket: Option<String>,

        #[arg(long, value_name = "PREFIX")]
        prefix: Option<String>,

        #[arg(long, value_name = "REGEX")]
        include: Option<String>,

        #[arg(long, value_name = "REGEX")]
        exclude: Option<String>,
    },

    /// Print the resource plan and file mapping without touching the endpoint
    Preview,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    stackform::utils::logging::init_logger(cli.color, cli.verbose);

    info!("Stackform deployment tool");
    info!("Loading configuration from: {}", cli.config.display());

    let config = if cli.config.exists() {
        Config::load(Some(cli.config.as_path())).context("Failed to load configuration")?
    } else {
        warn!(
            "Config file {} not found, using default configuration",
            cli.config.display()
        );
        Config::load(None).unwrap_or_else(|e| {
            warn!("Falling back to built-in defaults: {}", e);
            Config::default_config()
        })
    };

    match cli.command {
        Commands::Deploy { skip_replication } => {
            cmd_deploy(&config, skip_replication).await?;
        }
        Commands::Sync {
            dir,
            bucket,
            prefix,
            include,
            exclude,
        } => {
            cmd_sync(&config, dir, bucket, prefix, include, exclude).await?;
        }
        Commands::Preview => {
            cmd_preview(&config)?;
        }
    }

    Ok(())
}

async fn cmd_deploy(config: &Config, skip_replication: bool) -> Result<()> {
    info!("Starting deployment for stack {}", config.stack.name);
    let start_time = Instant::now();

    if !skip_replication {
        Validator::validate_directory(&config.replication.source_dir)
            .context("Replication source directory is not usable")?;
    }

    let provider = CloudProvider::connect(&config.provider).await;
    provider
        .ping()
        .await
        .context("Cannot reach the emulation endpoint")?;

    let mut stack = Stack::new(&config.stack.name);

    let policy_name = stack.scoped_name("lambda-logging");
    let policy = iam::declare_logging_policy(&provider.iam, &policy_name).await?;
    stack.record(ResourceKind::Policy, &policy.name, &policy.arn);

    let role_name = stack.scoped_name("lambda-exec");
    let role = iam::declare_execution_role(&provider.iam, &role_name).await?;
    stack.record(ResourceKind::Role, &role.name, &role.arn);

    iam::attach_role_policy(&provider.iam, &role, &policy).await?;
    stack.record(
        ResourceKind::RolePolicyAttachment,
        format!("{}:{}", role.name, policy.name),
        &policy.arn,
    );

    let layer_name = stack.scoped_name(&config.function.layer_name);
    let layer = lambda::declare_layer(&provider.lambda, &config.function, &layer_name).await?;
    stack.record(ResourceKind::LayerVersion, &layer.name, &layer.arn);

    let function_name = stack.scoped_name(&config.function.name);
    let function = lambda::declare_function(
        &provider.lambda,
        &config.function,
        &function_name,
        &role.arn,
        &layer.arn,
    )
    .await?;
    stack.record(ResourceKind::Function, &function.name, &function.arn);

    let bucket = objects::declare_bucket(
        &provider.s3,
        &config.replication.bucket,
        &config.provider.region,
    )
    .await?;
    stack.record(ResourceKind::Bucket, &bucket.name, &bucket.name);

    if skip_replication {
        info!("Replication skipped (--skip-replication)");
    } else {
        let publisher = FolderPublisher::new(&provider.s3, &bucket.name);
        let handles = publisher
            .publish_with(
                &config.replication.source_dir.to_string_lossy(),
                &config.replication.key_prefix,
                &config.replication.walk_options()?,
            )
            .await
            .context("Folder replication failed")?;

        for handle in &handles {
            stack.record(
                ResourceKind::Object,
                &handle.key,
                format!("s3://{}/{}", handle.bucket, handle.key),
            );
        }
    }

    print_ledger(&stack);

    let elapsed = start_time.elapsed();
    println!(
        "{}",
        format_success(&format!(
            "Deployed {} resources in {:.2}s",
            stack.len(),
            elapsed.as_secs_f64()
        ))
    );

    Ok(())
}

async fn cmd_sync(
    config: &Config,
    dir: Option<PathBuf>,
    bucket: Option<String>,
    prefix: Option<String>,
    include: Option<String>,
    exclude: Option<String>,
) -> Result<()> {
    let mut replication = config.replication.clone();
    if let Some(dir) = dir {
        replication.source_dir = dir;
    }
    if let Some(bucket) = bucket {
        replication.bucket = bucket;
    }
    if let Some(prefix) = prefix {
        replication.key_prefix = prefix;
    }
    if include.is_some() {
        replication.include_pattern = include;
    }
    if exclude.is_some() {
        replication.exclude_pattern = exclude;
    }

    Validator::validate_directory(&replication.source_dir)
        .context("Replication source directory is not usable")?;

    let provider = CloudProvider::connect(&config.provider).await;
    provider
        .ping()
        .await
        .context("Cannot reach the emulation endpoint")?;

    let bucket = objects::declare_bucket(
        &provider.s3,
        &replication.bucket,
        &config.provider.region,
    )
    .await?;

    let publisher = FolderPublisher::new(&provider.s3, &bucket.name);
    let handles = publisher
        .publish_with(
            &replication.source_dir.to_string_lossy(),
            &replication.key_prefix,
            &replication.walk_options()?,
        )
        .await
        .context("Folder replication failed")?;

    println!(
        "{}",
        format_success(&format!(
            "Replicated {} objects to s3://{}/{}",
            handles.len(),
            bucket.name,
            replication.key_prefix
        ))
    );

    Ok(())
}

fn cmd_preview(config: &Config) -> Result<()> {
    let stack = Stack::new(&config.stack.name);

    println!(
        "{}",
        format_info(&format!(
            "Plan for stack {} against {}",
            config.stack.name, config.provider.endpoint_url
        ))
    );

    let planned = [
        (ResourceKind::Policy, stack.scoped_name("lambda-logging")),
        (ResourceKind::Role, stack.scoped_name("lambda-exec")),
        (
            ResourceKind::RolePolicyAttachment,
            format!(
                "{}:{}",
                stack.scoped_name("lambda-exec"),
                stack.scoped_name("lambda-logging")
            ),
        ),
        (
            ResourceKind::LayerVersion,
            stack.scoped_name(&config.function.layer_name),
        ),
        (
            ResourceKind::Function,
            stack.scoped_name(&config.function.name),
        ),
        (ResourceKind::Bucket, config.replication.bucket.clone()),
    ];

    for (n, (kind, name)) in planned.iter().enumerate() {
        println!(
            "{}",
            format_step(n + 1, planned.len(), &format!("{:<28} {}", kind.as_str(), name))
        );
    }

    Validator::validate_directory(&config.replication.source_dir)
        .context("Replication source directory is not usable")?;

    let entries = remap_folder_with(
        &config.replication.source_dir.to_string_lossy(),
        &config.replication.key_prefix,
        &config.replication.walk_options()?,
    )?;

    println!(
        "{}",
        format_info(&format!(
            "{} files would be replicated to s3://{}",
            entries.len(),
            config.replication.bucket
        ))
    );
    for entry in &entries {
        println!("  {} -> {}", entry.path, entry.key);
    }

    Ok(())
}

fn print_ledger(stack: &Stack) {
    println!(
        "{}",
        format_info(&format!(
            "Stack {} ({} environment)",
            stack.name, stack.env
        ))
    );

    let total = stack.len();
    for (n, record) in stack.records().iter().enumerate() {
        println!(
            "{}",
            format_step(
                n + 1,
                total,
                &format!("{:<28} {} -> {}", record.kind.as_str(), record.name, record.id)
            )
        );
    }
}
