use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use resume_ranker::{
    dashboard, pipeline, report, Config, JdSource, Qualification, RankError, Similarity,
};

#[derive(Parser)]
#[command(name = "resume-ranker", version, about = "Rank resumes against a job description")]
struct Cli {
    /// Debug-level logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank resumes against a job description
    Rank {
        /// Job description file (txt/md/pdf/docx) or http(s) URL
        #[arg(long)]
        jd: String,
        /// Folder of resumes, searched recursively
        #[arg(long)]
        resumes: PathBuf,
        /// Where to write the ranked CSV; prints a table when omitted
        #[arg(long)]
        out: Option<PathBuf>,
        /// Number of candidates to return
        #[arg(long, default_value_t = 10)]
        top_k: usize,
        #[arg(long)]
        w_skills: Option<f64>,
        #[arg(long)]
        w_sim: Option<f64>,
        #[arg(long)]
        w_exp: Option<f64>,
        /// JSON configuration file
        #[arg(long)]
        config: Option<PathBuf>,
        /// Comma-separated skill list, replaces the configured one
        #[arg(long, value_delimiter = ',')]
        skills: Option<Vec<String>>,
        /// Years of experience assumed when the job description states none
        #[arg(long)]
        default_target: Option<f64>,
        #[arg(long, value_enum, default_value_t = Backend::Tfidf)]
        backend: Backend,
        /// Open the interactive table after ranking
        #[arg(long)]
        interactive: bool,
        #[command(flatten)]
        qualify: QualifyArgs,
    },
    /// Browse a previously exported ranking
    Dashboard {
        #[arg(long)]
        csv: PathBuf,
        #[command(flatten)]
        qualify: QualifyArgs,
    },
}

/// Any of these switches qualification on; unset ones keep the configured
/// (or default) thresholds.
#[derive(Args, Default)]
struct QualifyArgs {
    /// Minimum total score to qualify, in [0, 1]
    #[arg(long)]
    min_total: Option<f64>,
    /// Minimum skills score to qualify, in [0, 1]
    #[arg(long)]
    min_skills: Option<f64>,
    /// Minimum similarity to qualify, in [0, 1]
    #[arg(long)]
    min_sim: Option<f64>,
}

impl QualifyArgs {
    fn resolve(&self, configured: Option<Qualification>) -> Option<Qualification> {
        if self.min_total.is_none() && self.min_skills.is_none() && self.min_sim.is_none() {
            return configured;
        }
        let mut q = configured.unwrap_or_default();
        if let Some(v) = self.min_total {
            q.min_total = v;
        }
        if self.min_skills.is_some() {
            q.min_skills = self.min_skills;
        }
        if self.min_sim.is_some() {
            q.min_sim = self.min_sim;
        }
        Some(q)
    }
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Backend {
    /// TF-IDF cosine similarity
    Tfidf,
    /// all-MiniLM-L6-v2 sentence embeddings (needs the `bert` feature)
    Bert,
}

fn init_tracing(verbose: bool) {
    let default = if verbose {
        "resume_ranker=debug,info"
    } else {
        "resume_ranker=info,warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_writer(std::io::stderr))
        .init();
}

fn similarity_backend(backend: Backend) -> anyhow::Result<Box<dyn Similarity>> {
    match backend {
        Backend::Tfidf => Ok(Box::new(resume_ranker::TfIdfSimilarity)),
        #[cfg(feature = "bert")]
        Backend::Bert => Ok(Box::new(resume_ranker::similarity::BertSimilarity::new()?)),
        #[cfg(not(feature = "bert"))]
        Backend::Bert => anyhow::bail!("this build has no `bert` feature; rebuild with --features bert"),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli.command, &mut io::stdout().lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            ExitCode::from(exit_status(&e))
        }
    }
}

/// 2 for bad input, 1 for everything else.
fn exit_status(err: &anyhow::Error) -> u8 {
    let input_error = err
        .downcast_ref::<RankError>()
        .is_some_and(RankError::is_input_error);
    if input_error {
        2
    } else {
        1
    }
}

fn run(command: Commands, out: &mut impl Write) -> anyhow::Result<()> {
    match command {
        Commands::Rank {
            jd,
            resumes,
            out: out_path,
            top_k,
            w_skills,
            w_sim,
            w_exp,
            config,
            skills,
            default_target,
            backend,
            interactive,
            qualify,
        } => {
            let mut cfg = match &config {
                Some(path) => Config::load(path)
                    .with_context(|| format!("loading config {}", path.display()))?,
                None => Config::default(),
            };
            if let Some(w) = w_skills {
                cfg.weights.w_skills = w;
            }
            if let Some(w) = w_sim {
                cfg.weights.w_sim = w;
            }
            if let Some(w) = w_exp {
                cfg.weights.w_exp = w;
            }
            if let Some(list) = skills {
                cfg.skills = list
                    .into_iter()
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect();
            }
            if let Some(target) = default_target {
                cfg.default_exp_target_years = target;
            }
            cfg.qualification = qualify.resolve(cfg.qualification);

            let similarity = similarity_backend(backend)?;
            let jd_source = JdSource::parse(&jd);
            let rows = pipeline::rank(&jd_source, &resumes, top_k, &cfg, similarity.as_ref())?;
            info!(returned = rows.len(), "ranking complete");
            let qualification = cfg.qualification.as_ref();

            match &out_path {
                Some(path) => {
                    report::write_csv(&rows, path)?;
                    writeln!(out, "Wrote {}", path.display())?;
                    if let Some(q) = qualification {
                        let (qualified, disqualified) = report::write_split(&rows, q, path)?;
                        writeln!(out, "Wrote {}", qualified.display())?;
                        writeln!(out, "Wrote {}", disqualified.display())?;
                    }
                }
                None if !interactive => write!(out, "{}", report::render_table(&rows, qualification))?,
                None => {}
            }

            if interactive {
                dashboard::run_dashboard(&rows, &format!("Ranking for {jd_source}"), qualification)?;
            }
        }
        Commands::Dashboard { csv, qualify } => {
            let qualification = qualify.resolve(None);
            if let Some(q) = &qualification {
                q.validate()?;
            }
            let rows = report::read_csv(&csv)
                .with_context(|| format!("reading ranking {}", csv.display()))?;
            dashboard::run_dashboard(&rows, &csv.display().to_string(), qualification.as_ref())?;
        }
    }
    Ok(())
}
