use anyhow::{bail, Context, Error};
use structopt::StructOpt;
use url::Url;
use yoga::{
    views::{
        self, MeView, RegisterView, SessionDetailView, SessionFormView,
        SessionListView, Transition,
    },
    Backend, SessionService,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Error> {
    env_logger::init();
    let args = Args::from_args();

    log::debug!("Starting application with {:#?}", args.command);

    let backend = Backend::new(args.api.clone())?;
    log::debug!("Using the API at {}", backend.base_url());
    let session = SessionService::new();

    // log every time the login state changes, for as long as we run
    session
        .subscribe(|logged| log::info!("Logged in: {}", logged))
        .forget();

    match args.command {
        Command::Register {
            ref first_name,
            ref last_name,
        } => register(&backend, &args, first_name, last_name).await,
        ref command => {
            login(&backend, &session, &args).await?;
            run(&backend, &session, command).await?;

            if session.is_logged() {
                let route = views::log_out(&session);
                log::debug!("Logged out, would navigate to {}", route);
            }

            Ok(())
        },
    }
}

/// Run a command which needs somebody to be logged in.
async fn run(
    backend: &Backend,
    session: &SessionService,
    command: &Command,
) -> Result<(), Error> {
    match *command {
        Command::Register { .. } => {
            bail!("Registering doesn't need a logged in user")
        },
        Command::Sessions => {
            let mut view = SessionListView::new(backend, session);
            for yoga_session in view.load().await? {
                println!(
                    "#{} {} on {} ({} attending)",
                    yoga_session.id.unwrap_or_default(),
                    yoga_session.name,
                    yoga_session.date,
                    yoga_session.users.len(),
                );
            }
        },
        Command::Show { id } => {
            let mut view = SessionDetailView::new(backend, session, id);
            view.load().await?;
            print_detail(&view);
        },
        Command::Teachers => {
            let mut view = SessionFormView::new(backend, session);
            view.init("/sessions/create").await?;
            for teacher in view.teachers() {
                println!(
                    "#{} {} {}",
                    teacher.id, teacher.first_name, teacher.last_name
                );
            }
        },
        Command::Participate { id } => {
            let mut view = SessionDetailView::new(backend, session, id);
            view.participate().await?;
            print_detail(&view);
        },
        Command::Unparticipate { id } => {
            let mut view = SessionDetailView::new(backend, session, id);
            view.unparticipate().await?;
            print_detail(&view);
        },
        Command::Create(ref fields) => {
            let mut view = SessionFormView::new(backend, session);
            if let Some(redirect) = view.init("/sessions/create").await? {
                bail!("Only administrators can create sessions ({})", redirect);
            }
            fields.fill(&mut view)?;
            report(view.submit().await?);
        },
        Command::Update { id, ref fields } => {
            let mut view = SessionFormView::new(backend, session);
            let url = views::Route::SessionUpdate(id).to_string();
            if let Some(redirect) = view.init(&url).await? {
                bail!("Only administrators can update sessions ({})", redirect);
            }
            fields.fill(&mut view)?;
            report(view.submit().await?);
        },
        Command::Delete { id } => {
            let mut view = SessionDetailView::new(backend, session, id);
            report(view.delete().await?);
        },
        Command::Me => {
            let mut view = MeView::new(backend, session);
            let user = view.load().await?;
            println!("{} <{}>", user.display_name(), user.email);
            if user.admin {
                println!("You are admin");
            }
            let created = user.created_at.as_deref().unwrap_or("-");
            let updated = user.updated_at.as_deref().unwrap_or("-");
            println!("Create at: {}", created);
            println!("Last update: {}", updated);
        },
        Command::DeleteAccount => {
            let mut view = MeView::new(backend, session);
            view.load().await?;
            report(view.delete_account().await?);
        },
    }

    Ok(())
}

async fn login(
    backend: &Backend,
    session: &SessionService,
    args: &Args,
) -> Result<(), Error> {
    let mut view = views::LoginView::new(backend, session);
    view.form.set_values(&[
        ("email", args.email.as_str()),
        ("password", args.password.as_str()),
    ])?;

    match view.submit().await {
        Some(_) => Ok(()),
        None if view.on_error() => bail!("{}", views::LoginView::ERROR_MESSAGE),
        None => bail!(
            "Invalid credentials: {:?}",
            view.form.invalid_fields().collect::<Vec<_>>()
        ),
    }
}

async fn register(
    backend: &Backend,
    args: &Args,
    first_name: &str,
    last_name: &str,
) -> Result<(), Error> {
    let mut view = RegisterView::new(backend);
    view.form.set_values(&[
        ("email", args.email.as_str()),
        ("firstName", first_name),
        ("lastName", last_name),
        ("password", args.password.as_str()),
    ])?;

    match view.submit().await {
        Some(route) => {
            println!("Registered {}, now log in ({})", args.email, route);
            Ok(())
        },
        None if view.on_error() => bail!("An error occurred"),
        None => bail!(
            "Invalid registration details: {:?}",
            view.form.invalid_fields().collect::<Vec<_>>()
        ),
    }
}

fn print_detail(view: &SessionDetailView<'_>) {
    if let Some(yoga_session) = view.yoga_session() {
        println!(
            "#{} {} ({})",
            view.session_id(),
            yoga_session.name,
            yoga_session.date
        );
        println!("{}", yoga_session.description);
        println!("{} attendees", yoga_session.users.len());
    }
    if let Some(teacher) = view.teacher() {
        println!(
            "Teacher: {} {}",
            teacher.first_name,
            teacher.last_name.to_uppercase()
        );
    }
    if view.is_participate() {
        println!("You are participating");
    }
}

fn report(transition: Transition) {
    if let Some(notice) = transition.notice {
        println!("{}", notice.message);
    }
    log::debug!("Would navigate to {}", transition.route);
}

#[derive(Debug, StructOpt)]
struct Args {
    #[structopt(
        long = "api",
        env = "YOGA_API",
        default_value = "http://localhost:8080/api/",
        help = "The Yoga Studio API's base URL"
    )]
    api: Url,
    #[structopt(short = "e", long = "email", help = "Your email address")]
    email: String,
    #[structopt(short = "p", long = "password", help = "Your password")]
    password: String,
    #[structopt(subcommand)]
    command: Command,
}

#[derive(Debug, StructOpt)]
enum Command {
    #[structopt(about = "Create a new account")]
    Register {
        #[structopt(long = "first-name")]
        first_name: String,
        #[structopt(long = "last-name")]
        last_name: String,
    },
    #[structopt(about = "List every session")]
    Sessions,
    #[structopt(about = "Show a single session")]
    Show { id: u64 },
    #[structopt(about = "List the teachers")]
    Teachers,
    #[structopt(about = "Sign up for a session")]
    Participate { id: u64 },
    #[structopt(about = "Stop participating in a session")]
    Unparticipate { id: u64 },
    #[structopt(about = "Create a session (admin only)")]
    Create(SessionFields),
    #[structopt(about = "Update a session (admin only)")]
    Update {
        id: u64,
        #[structopt(flatten)]
        fields: SessionFields,
    },
    #[structopt(about = "Delete a session (admin only)")]
    Delete { id: u64 },
    #[structopt(about = "Show your account")]
    Me,
    #[structopt(about = "Delete your account")]
    DeleteAccount,
}

#[derive(Debug, StructOpt)]
struct SessionFields {
    #[structopt(long = "name")]
    name: Option<String>,
    #[structopt(long = "date", help = "The date, as YYYY-MM-DD")]
    date: Option<String>,
    #[structopt(long = "teacher", help = "The teacher's id")]
    teacher: Option<u64>,
    #[structopt(long = "description")]
    description: Option<String>,
}

impl SessionFields {
    /// Overwrite any form fields that were given on the command line.
    fn fill(&self, view: &mut SessionFormView<'_>) -> Result<(), Error> {
        let teacher = self.teacher.map(|id| id.to_string());
        let values = [
            ("name", self.name.as_deref()),
            ("date", self.date.as_deref()),
            ("teacher_id", teacher.as_deref()),
            ("description", self.description.as_deref()),
        ];

        for (name, value) in values {
            if let Some(value) = value {
                view.form
                    .set(name, value)
                    .with_context(|| format!("Unable to set \"{}\"", name))?;
            }
        }

        if !view.form.can_submit() {
            bail!(
                "Missing or invalid fields: {:?}",
                view.form.invalid_fields().collect::<Vec<_>>()
            );
        }

        Ok(())
    }
}
