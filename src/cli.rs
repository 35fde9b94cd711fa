use std::path::PathBuf;

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};

use nrl_application::{error::AppError, prelude as flows};
use nrl_core::{
    entities::*,
    repositories::ObstacleQuery,
    usecases::{self, ObstacleMetadata, SubmissionIntent, WizardStep},
};
use nrl_db_sqlite::Connections;
use nrl_gateways::draft::JsonFileDraftStore;

use crate::config::Config;

/// Register vertical obstacles for the national register of aviation obstacles.
#[derive(Parser)]
#[command(name = "nrl", version, about, long_about = None)]
pub struct Args {
    /// Configuration file (TOML)
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,

    /// Id of the acting user
    #[arg(long, short, global = true, env = "NRL_USER")]
    pub user: Option<String>,

    /// Roles of the acting user, e.g. "approver" or "admin"
    #[arg(long = "role", global = true, value_parser = parse_role)]
    pub roles: Vec<Role>,

    /// Identifies the submission in progress (letters, digits, '-' and '_')
    #[arg(
        long,
        global = true,
        default_value = "cli",
        env = "NRL_SESSION",
        value_parser = parse_session
    )]
    pub session: SessionId,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Store the drawn geometry (GeoJSON) of a new obstacle
    Draw {
        geo_json: String,
    },
    /// Enter the metadata of the drawn obstacle and store it
    Submit {
        #[command(flatten)]
        metadata: MetadataArgs,
        /// Keep the obstacle as a private draft
        #[arg(long)]
        draft: bool,
        /// The pressed button, "draft" saves a draft
        #[arg(long)]
        action: Option<String>,
    },
    /// Discard the drawn geometry
    Abandon,
    /// List all visible obstacles, newest first
    List {
        /// Case-insensitive part of the name
        #[arg(long)]
        name: Option<String>,
        #[arg(long, value_parser = parse_state)]
        state: Option<ObstacleState>,
        #[arg(long)]
        min_height: Option<u32>,
        #[arg(long)]
        max_height: Option<u32>,
        /// Created at or after, e.g. 2024-05-01T00:00:00Z
        #[arg(long, value_parser = parse_timestamp)]
        created_from: Option<Timestamp>,
        /// Created at or before, e.g. 2024-05-31T23:59:59Z
        #[arg(long, value_parser = parse_timestamp)]
        created_to: Option<Timestamp>,
    },
    /// Show the details of an obstacle
    Show {
        id: ObstacleId,
    },
    /// Edit one of your drafts
    Edit {
        id: ObstacleId,
        #[command(flatten)]
        metadata: MetadataArgs,
        /// Replace the geometry
        #[arg(long)]
        geo_json: Option<String>,
        /// Hand the draft over for review
        #[arg(long)]
        submit: bool,
    },
    /// Delete one of your drafts
    Delete {
        id: ObstacleId,
    },
    /// Approve a pending obstacle
    Approve {
        id: ObstacleId,
        #[arg(long)]
        comment: Option<String>,
    },
    /// Reject a pending obstacle
    Reject {
        id: ObstacleId,
        #[arg(long)]
        comment: Option<String>,
    },
}

#[derive(clap::Args)]
pub struct MetadataArgs {
    #[arg(long, default_value = "")]
    name: String,
    #[arg(long)]
    description: Option<String>,
    #[arg(long)]
    height: Option<f64>,
    /// "m" or "ft"
    #[arg(long, default_value = "m")]
    unit: String,
}

impl From<MetadataArgs> for ObstacleMetadata {
    fn from(from: MetadataArgs) -> Self {
        let MetadataArgs {
            name,
            description,
            height,
            unit,
        } = from;
        Self {
            name,
            description,
            height_value: height,
            height_unit: nrl_core::util::height::parse_height_unit(&unit),
        }
    }
}

fn parse_role(s: &str) -> Result<Role, String> {
    s.parse().map_err(|_| format!("unknown role '{s}'"))
}

fn parse_state(s: &str) -> Result<ObstacleState, String> {
    s.parse().map_err(|_| format!("unknown state '{s}'"))
}

fn parse_session(s: &str) -> Result<SessionId, String> {
    let session = SessionId::from(s);
    if !session.is_valid() {
        return Err(format!("invalid session id '{s}'"));
    }
    Ok(session)
}

fn parse_timestamp(s: &str) -> Result<Timestamp, String> {
    s.parse()
        .map_err(|err| format!("invalid RFC 3339 date-time '{s}': {err}"))
}

impl Args {
    fn auth_context(&self) -> AuthContext {
        let auth = self
            .user
            .as_deref()
            .map(AuthContext::user)
            .unwrap_or_else(AuthContext::anonymous);
        self.roles
            .iter()
            .fold(auth, |auth, role| auth.with_role(*role))
    }
}

pub fn run(cfg: Config, args: Args) -> Result<()> {
    let connections = Connections::init(&cfg.db.conn_sqlite, cfg.db.conn_pool_size.into())?;
    nrl_db_sqlite::run_embedded_database_migrations(connections.exclusive()?)?;
    let drafts = JsonFileDraftStore::try_new(&cfg.drafts.dir)?;
    log::debug!("Keeping draft geometries in {}", drafts.path().display());

    let auth = args.auth_context();
    let session = args.session;
    let policy = cfg.obstacles.access_policy;

    let res = match args.command {
        Command::Draw { geo_json } => {
            flows::capture_geometry(&drafts, &session, &geo_json).map(|step| {
                debug_assert_eq!(WizardStep::AwaitingMetadata, step);
                println!("Geometry saved. Continue with `nrl submit`.");
            })
        }
        Command::Submit {
            metadata,
            draft,
            action,
        } => {
            if flows::enter_metadata_step(&drafts, &session) == WizardStep::AwaitingGeometry {
                println!("Please draw the obstacle first with `nrl draw`.");
                return Ok(());
            }
            let intent = SubmissionIntent::from_action(action.as_deref(), draft);
            flows::submit_obstacle(
                &connections,
                &drafts,
                &session,
                &auth,
                policy,
                metadata.into(),
                intent,
            )
            .map(|submission| {
                if submission.draft {
                    println!("Thank you! Obstacle {} has been saved as draft.", submission.id);
                } else {
                    println!(
                        "Thank you! Obstacle {} has been submitted for review.",
                        submission.id
                    );
                }
            })
        }
        Command::Abandon => flows::abandon_submission(&drafts, &session),
        Command::List {
            name,
            state,
            min_height,
            max_height,
            created_from,
            created_to,
        } => {
            let query = ObstacleQuery {
                name,
                state,
                min_height_m: min_height,
                max_height_m: max_height,
                created_from,
                created_to,
                ..Default::default()
            };
            flows::list_obstacles(&connections, &auth, policy, query).map(|obstacles| {
                for obstacle in obstacles {
                    print_summary(&obstacle);
                }
            })
        }
        Command::Show { id } => {
            flows::get_obstacle(&connections, &auth, policy, id).map(|obstacle| print_details(&obstacle))
        }
        Command::Edit {
            id,
            metadata,
            geo_json,
            submit,
        } => {
            let intent = if submit {
                SubmissionIntent::Final
            } else {
                SubmissionIntent::Draft
            };
            let update = usecases::UpdateObstacle {
                geo_json,
                metadata: metadata.into(),
                intent,
            };
            flows::update_obstacle(&connections, &auth, id, update)
                .map(|state| println!("Obstacle {id} has been updated ({state})."))
        }
        Command::Delete { id } => flows::delete_obstacle(&connections, &auth, id)
            .map(|()| println!("Obstacle {id} has been deleted.")),
        Command::Approve { id, comment } => {
            review(&connections, &auth, id, ReviewDecision::Approve, comment)
        }
        Command::Reject { id, comment } => {
            review(&connections, &auth, id, ReviewDecision::Reject, comment)
        }
    };
    res.or_else(report_error)
}

fn review(
    connections: &Connections,
    auth: &AuthContext,
    id: ObstacleId,
    decision: ReviewDecision,
    comment: Option<String>,
) -> nrl_application::Result<()> {
    flows::review_obstacle(connections, auth, id, decision, comment.as_deref())
        .map(|outcome| println!("{}", outcome.status_message()))
}

fn report_error(err: AppError) -> Result<()> {
    use nrl_application::error::{BError, ErrorKind};
    let message = match err.kind() {
        ErrorKind::Validation => match &err {
            AppError::Business(BError::Parameter(usecases::Error::Metadata(invalid))) => {
                for field in &invalid.fields {
                    eprintln!("{}: {}", field.name(), field.message());
                }
                "Please correct the input and try again."
            }
            _ => "The input is invalid.",
        },
        ErrorKind::GeometryMissing => "Please draw the obstacle first with `nrl draw`.",
        ErrorKind::NotFound => "The obstacle does not exist.",
        ErrorKind::NotOwnedOrMissing => "The obstacle does not exist or is not yours.",
        ErrorKind::Unauthorized => "Please log in with --user.",
        ErrorKind::Forbidden => "You are not allowed to do this.",
        ErrorKind::InvalidState => "The obstacle can no longer be changed.",
        ErrorKind::Persistence => return Err(err.into()),
    };
    log::debug!("{err}");
    Err(anyhow!(message))
}

fn print_summary(obstacle: &ObstacleSummary) {
    let height = obstacle
        .height_m
        .map(|h| format!("{h} m"))
        .unwrap_or_else(|| "-".into());
    println!(
        "{:>6}  {:<9}  {:>8}  {}  {}",
        obstacle.id,
        obstacle.state().to_string(),
        height,
        obstacle.created_at,
        obstacle.name
    );
}

fn print_details(obstacle: &Obstacle) {
    println!("Id:          {}", obstacle.id);
    println!("Name:        {}", obstacle.name);
    if let Some(description) = &obstacle.description {
        println!("Description: {description}");
    }
    if let Some(height_m) = obstacle.height_m {
        println!("Height:      {height_m} m");
    }
    println!("State:       {}", obstacle.state());
    if let Some(comment) = &obstacle.review_comment {
        println!("Comment:     {comment}");
    }
    if let Some(created_by) = &obstacle.created_by {
        println!("Created by:  {created_by}");
    }
    if let Some(assigned_to) = &obstacle.assigned_to {
        println!("Reviewed by: {assigned_to}");
    }
    println!("Created at:  {}", obstacle.created_at);
    println!("Geometry:    {}", obstacle.geometry);
}
