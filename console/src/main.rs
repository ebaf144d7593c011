use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use client::api::auth::NewUser;
use client::api::attendance::NewAttendance;
use client::api::pyq::NewPyq;
use client::api::results::NewResult;
use client::api::timetable::{NewTimeSlot, NewTimetable};
use client::gateway::ApiClient;
use client::models::{AttendanceStatus, Role, SubjectGrade, Weekday};
use client::session::SessionStore;
use common::config::{self, AppConfig};
use console::controllers::admin::AdminConsole;
use console::controllers::login::LoginController;
use console::controllers::student::StudentConsole;
use console::guard::GuardOutcome;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(name = "campusboard", version, about = "Console for the college records backend")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sign in and persist the session
    Login {
        student_id: String,
        password: String,
    },
    /// Clear the persisted session
    Logout,
    /// Create an account (admin-gated on the backend)
    Register {
        student_id: String,
        name: String,
        password: String,
        /// "admin" or "student"
        #[arg(long, default_value = "student")]
        role: String,
        #[arg(long)]
        email: Option<String>,
    },
    /// Mount the student console
    Student {
        /// Tab to focus after loading
        #[arg(long)]
        tab: Option<String>,
    },
    /// Mount the admin console
    Admin {
        #[arg(long)]
        tab: Option<String>,
        /// Load the results panel for this student
        #[arg(long)]
        student: Option<String>,
    },
    /// Admin: bulk-upload an attendance CSV
    UploadAttendance { file: PathBuf },
    /// Admin: record one attendance entry
    AddAttendance {
        student_id: String,
        subject: String,
        /// ISO date, e.g. 2024-01-15
        date: String,
        /// "present" or "absent"
        status: String,
    },
    /// Admin: publish one day's timetable
    SaveTimetable {
        /// e.g. Monday
        day: String,
        /// Slots as start-end-subject[-faculty], e.g. 09:00-10:00-Networks
        #[arg(required = true)]
        slots: Vec<String>,
        #[arg(long)]
        student_id: Option<String>,
    },
    /// Admin: upload a past-year question paper
    UploadPyq {
        file: PathBuf,
        subject: String,
        semester: i32,
        year: i32,
        exam_type: String,
    },
    /// Admin: delete a past-year question paper
    DeletePyq { id: String },
    /// Admin: upload a semester result
    UploadResult {
        student_id: String,
        semester: i32,
        academic_year: String,
        #[arg(long)]
        sgpa: Option<f64>,
        #[arg(long)]
        cgpa: Option<f64>,
        /// Grades as subject=grade pairs
        #[arg(long)]
        grade: Vec<String>,
        #[arg(long)]
        file: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    drop(AppConfig::global());
    common::logger::init_logger(
        &config::log_level(),
        &config::log_file(),
        config::log_to_stdout(),
    );

    let session = Arc::new(SessionStore::load(config::session_file()));
    let client = ApiClient::from_config(session).context("building API client")?;

    match args.command {
        Command::Login {
            student_id,
            password,
        } => {
            let controller = LoginController::new(client);
            let role = controller.login(&student_id, &password).await?;
            println!("Logged in as {student_id} ({role}). Console: campusboard {role}");
        }
        Command::Logout => {
            LoginController::new(client).logout();
            println!("Logged out.");
        }
        Command::Register {
            student_id,
            name,
            password,
            role,
            email,
        } => {
            let role = parse_role(&role)?;
            let user = NewUser {
                student_id,
                name,
                email,
                password,
                role,
            };
            let created = LoginController::new(client).register(&user).await?;
            println!("Registered {} ({})", created.student_id, created.role);
        }
        Command::Student { tab } => {
            let mut console = mount_student(client)?;
            console.load_all().await;
            if let Some(tab) = tab {
                console.switch_tab(&tab).await;
            }
            bail_if_expired(console.session_expired())?;
            println!("{}", console.render());
            println!("[active tab: {}]", console.active_tab());
        }
        Command::Admin { tab, student } => {
            let mut console = mount_admin(client)?;
            console.load_all().await;
            if let Some(tab) = tab {
                console.switch_tab(&tab).await;
            }
            if let Some(student_id) = student {
                console.load_results_for(&student_id).await;
            }
            bail_if_expired(console.session_expired())?;
            println!("{}", console.render());
            println!("[active tab: {}]", console.active_tab());
        }
        Command::UploadAttendance { file } => {
            let mut console = mount_admin(client)?;
            let summary = console.upload_attendance_csv(&file).await?;
            println!("{}", console::controllers::admin::bulk_upload_status(&summary));
        }
        Command::AddAttendance {
            student_id,
            subject,
            date,
            status,
        } => {
            let record = NewAttendance {
                student_id,
                subject,
                date: date.parse().context("date must be YYYY-MM-DD")?,
                status: parse_status(&status)?,
            };
            let mut console = mount_admin(client)?;
            console.add_attendance(&record).await?;
            println!("Attendance record added successfully!");
        }
        Command::SaveTimetable {
            day,
            slots,
            student_id,
        } => {
            let entry = NewTimetable {
                student_id,
                day: parse_day(&day)?,
                time_slots: slots
                    .iter()
                    .map(|spec| parse_slot(spec))
                    .collect::<Result<Vec<_>>>()?,
            };
            let mut console = mount_admin(client)?;
            console.save_timetable(&entry).await?;
            println!("Timetable saved successfully!");
        }
        Command::UploadPyq {
            file,
            subject,
            semester,
            year,
            exam_type,
        } => {
            let bytes = std::fs::read(&file)
                .with_context(|| format!("reading {}", file.display()))?;
            let file_name = file
                .file_name()
                .and_then(|name| name.to_str())
                .context("file has no usable name")?
                .to_string();
            let new_pyq = NewPyq {
                subject,
                semester,
                year,
                exam_type,
            };
            let mut console = mount_admin(client)?;
            console.upload_pyq(&new_pyq, &file_name, bytes).await?;
            println!("PYQ uploaded successfully!");
        }
        Command::DeletePyq { id } => {
            let mut console = mount_admin(client)?;
            console.delete_pyq(&id).await?;
            println!("PYQ deleted successfully!");
        }
        Command::UploadResult {
            student_id,
            semester,
            academic_year,
            sgpa,
            cgpa,
            grade,
            file,
        } => {
            let subjects = grade
                .iter()
                .map(|pair| parse_grade(pair))
                .collect::<Result<Vec<_>>>()?;
            let new_result = NewResult {
                student_id,
                semester,
                academic_year,
                sgpa,
                cgpa,
                subjects,
            };

            let file_bytes = match &file {
                Some(path) => Some((
                    path.file_name()
                        .and_then(|name| name.to_str())
                        .context("file has no usable name")?
                        .to_string(),
                    std::fs::read(path).with_context(|| format!("reading {}", path.display()))?,
                )),
                None => None,
            };
            let file_arg = file_bytes
                .as_ref()
                .map(|(name, bytes)| (name.as_str(), bytes.clone()));

            let mut console = mount_admin(client)?;
            console.upload_result(&new_result, file_arg).await?;
            println!("Result uploaded successfully!");
        }
    }

    Ok(())
}

fn mount_student(client: ApiClient) -> Result<StudentConsole> {
    StudentConsole::mount(client).map_err(describe_guard)
}

fn mount_admin(client: ApiClient) -> Result<AdminConsole> {
    AdminConsole::mount(client).map_err(describe_guard)
}

fn describe_guard(outcome: GuardOutcome) -> anyhow::Error {
    match outcome {
        GuardOutcome::RedirectToLogin => {
            anyhow::anyhow!("not signed in; run `campusboard login <student-id> <password>`")
        }
        GuardOutcome::RedirectTo(role) => {
            anyhow::anyhow!("this session belongs to the {role} console; run `campusboard {role}`")
        }
        GuardOutcome::Proceed(_) => unreachable!("mount only fails on non-proceed outcomes"),
    }
}

fn bail_if_expired(expired: bool) -> Result<()> {
    if expired {
        bail!("session expired; run `campusboard login <student-id> <password>`");
    }
    Ok(())
}

fn parse_role(value: &str) -> Result<Role> {
    match value.to_lowercase().as_str() {
        "admin" => Ok(Role::Admin),
        "student" => Ok(Role::Student),
        other => bail!("unknown role {other:?}; expected admin or student"),
    }
}

fn parse_status(value: &str) -> Result<AttendanceStatus> {
    match value.to_lowercase().as_str() {
        "present" => Ok(AttendanceStatus::Present),
        "absent" => Ok(AttendanceStatus::Absent),
        other => bail!("unknown status {other:?}; expected present or absent"),
    }
}

fn parse_day(value: &str) -> Result<Weekday> {
    Weekday::ALL
        .into_iter()
        .find(|day| day.as_str().eq_ignore_ascii_case(value))
        .with_context(|| format!("unknown day {value:?}"))
}

/// `start-end-subject[-faculty]`, times as HH:MM.
fn parse_slot(spec: &str) -> Result<NewTimeSlot> {
    let parts: Vec<&str> = spec.splitn(4, '-').collect();
    if parts.len() < 3 {
        bail!("slot {spec:?} must be start-end-subject[-faculty]");
    }
    Ok(NewTimeSlot {
        start_time: parts[0].to_string(),
        end_time: parts[1].to_string(),
        subject: parts[2].to_string(),
        faculty: parts.get(3).map(|s| s.to_string()),
        room: None,
    })
}

fn parse_grade(pair: &str) -> Result<SubjectGrade> {
    let (subject, grade) = pair
        .split_once('=')
        .with_context(|| format!("grade {pair:?} must be subject=grade"))?;
    Ok(SubjectGrade {
        subject: subject.to_string(),
        grade: grade.to_string(),
        marks: None,
        credits: None,
    })
}
