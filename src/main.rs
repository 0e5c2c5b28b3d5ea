//! Receiptdesk command-line entry point

use anyhow::Context;
use clap::{Parser, Subcommand};
use receiptdesk_client::Page;
use receiptdesk_config::{Config, ConfigErrorSeverity};
use receiptdesk_core::{Column, LogoFile, LogoPosition, NotificationKind, PageAction, ReceiptStatus};
use receiptdesk_utils::{format_ein, format_phone_number, format_zip};
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Parser, Debug)]
#[command(name = "receiptdesk")]
#[command(version = "0.1.0")]
#[command(about = "Donation receipts from QuickBooks, from the command line", long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "receiptdesk.yaml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the QuickBooks connection state
    Status,
    /// Connect to QuickBooks, optionally waiting for authorization
    Connect {
        #[arg(long)]
        wait: bool,
    },
    /// Pull donations and print the receipt table
    Sync {
        /// Search text or a time phrase such as "last month"
        #[arg(long)]
        query: Option<String>,
        /// Column to sort by (date, donor_name, donor_email, amount, qb_docnum)
        #[arg(long)]
        sort: Option<String>,
        #[arg(long)]
        descending: bool,
    },
    #[command(subcommand)]
    Receipt(ReceiptCommand),
    #[command(subcommand)]
    Org(OrgCommand),
    #[command(subcommand)]
    Logo(LogoCommand),
    #[command(subcommand)]
    EmailSettings(EmailSettingsCommand),
    #[command(subcommand)]
    Welcome(WelcomeCommand),
    /// Send feedback to the team
    Feedback {
        message: String,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        rating: Option<u8>,
    },
    /// Disconnect from QuickBooks
    Disconnect,
    #[command(subcommand)]
    Format(FormatCommand),
}

#[derive(Subcommand, Debug)]
enum ReceiptCommand {
    Check { transaction_id: String },
    Generate { transaction_id: String },
    GenerateAll,
    Email {
        transaction_id: String,
        email: String,
        #[arg(long)]
        subject: Option<String>,
        #[arg(long)]
        message: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
enum OrgCommand {
    Show,
    /// Update the fields given; others keep their stored value
    Save {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        ein: Option<String>,
        #[arg(long)]
        address: Option<String>,
        #[arg(long)]
        city: Option<String>,
        #[arg(long)]
        state: Option<String>,
        #[arg(long)]
        zip: Option<String>,
        #[arg(long)]
        contact: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        url: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
enum LogoCommand {
    Show,
    Upload {
        path: PathBuf,
        #[arg(long, default_value = "top-left")]
        position: String,
    },
    Delete,
}

#[derive(Subcommand, Debug)]
enum EmailSettingsCommand {
    Show,
    Test { address: String },
}

#[derive(Subcommand, Debug)]
enum WelcomeCommand {
    /// Show the welcome screen again
    Show,
    /// Don't show the welcome screen again
    Hide,
    Status,
}

#[derive(Subcommand, Debug)]
enum FormatCommand {
    Phone { value: String },
    Ein { value: String },
    Zip { value: String },
}

fn load_config(path: &PathBuf) -> anyhow::Result<(Config, bool)> {
    match Config::load(path) {
        Ok(config) => Ok((config, true)),
        Err(e) if e.severity() == ConfigErrorSeverity::Warning => Ok((Config::default(), false)),
        Err(e) => {
            // Logging is not configured yet, so report the details directly
            eprintln!("{}", e.to_details());
            Err(e).with_context(|| format!("Failed to load {}", path.display()))
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let (config, from_file) = load_config(&args.config)?;

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.logging.level.as_str()),
    )
    .init();

    if from_file {
        log::debug!("Config loaded from {}", args.config.display());
    } else {
        log::info!("{} not found, using defaults", args.config.display());
    }

    if let Command::Format(format) = &args.command {
        let formatted = match format {
            FormatCommand::Phone { value } => format_phone_number(value),
            FormatCommand::Ein { value } => format_ein(value),
            FormatCommand::Zip { value } => format_zip(value),
        };
        println!("{}", formatted);
        return Ok(());
    }

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    rt.block_on(async {
        let mut page = Page::from_config(config).context("Failed to create backend client")?;
        let action = run(&mut page, args.command).await?;
        report(&mut page, action)
    })
}

async fn run(page: &mut Page, command: Command) -> anyhow::Result<PageAction> {
    let action = match command {
        Command::Status => {
            let connected = page.refresh_status().await;
            println!(
                "QuickBooks: {}",
                if connected { "connected" } else { "not connected" }
            );
            PageAction::None
        }
        Command::Connect { wait } => match page.connect().await {
            PageAction::Redirect(url) if wait => {
                println!("Open this URL to authorize QuickBooks: {}", url);
                page.await_authentication().await
            }
            action => action,
        },
        Command::Sync {
            query,
            sort,
            descending,
        } => {
            let action = page.sync().await;
            if let Some(column) = sort {
                let column = Column::from_str(&column).map_err(anyhow::Error::msg)?;
                page.table.sort(column);
                if descending {
                    page.table.sort(column);
                }
            }
            if let Some(query) = query {
                let today = page.today();
                page.table.search(&query, today);
            }
            print_table(page);
            action
        }
        Command::Receipt(command) => run_receipt(page, command).await,
        Command::Org(command) => run_org(page, command).await,
        Command::Logo(command) => run_logo(page, command).await?,
        Command::EmailSettings(EmailSettingsCommand::Show) => {
            page.open_email_settings().await;
            let form = &page.email_settings_form;
            println!("Custom SMTP: {}", form.use_custom);
            println!("Host:        {}", form.smtp_host);
            println!("Port:        {}", form.smtp_port);
            println!("User:        {}", form.smtp_user);
            println!("Secure:      {}", form.smtp_secure);
            println!("From:        {} <{}>", form.from_name, form.from_email);
            PageAction::None
        }
        Command::EmailSettings(EmailSettingsCommand::Test { address }) => {
            page.test_email_settings(&address).await
        }
        Command::Welcome(command) => {
            if page.refresh_status().await {
                page.flush_pending_preferences().await;
            }
            match command {
                WelcomeCommand::Show => {
                    page.set_welcome_preference(true).await;
                }
                WelcomeCommand::Hide => {
                    page.set_welcome_preference(false).await;
                }
                WelcomeCommand::Status => {
                    println!("Show welcome screen: {}", page.welcome_preference().await);
                    println!("Waiting to sync: {}", page.preferences.has_pending());
                }
            }
            PageAction::None
        }
        Command::Feedback {
            message,
            category,
            email,
            rating,
        } => {
            page.open_feedback();
            page.feedback_form.message = message;
            page.feedback_form.category = category.unwrap_or_default();
            page.feedback_form.email = email.unwrap_or_default();
            page.feedback_form.rating = rating;
            page.submit_feedback().await
        }
        Command::Disconnect => page.disconnect().await,
        Command::Format(_) => PageAction::None,
    };
    Ok(action)
}

async fn run_receipt(page: &mut Page, command: ReceiptCommand) -> PageAction {
    match command {
        ReceiptCommand::Check { transaction_id } => {
            page.open_receipt(&transaction_id).await;
            match page.receipt.status {
                ReceiptStatus::Ready => println!("Receipt for {} is ready", transaction_id),
                ReceiptStatus::NotGenerated => {
                    println!("Receipt for {} has not been generated", transaction_id)
                }
                ReceiptStatus::Unknown => {}
            }
            PageAction::None
        }
        ReceiptCommand::Generate { transaction_id } => {
            page.open_receipt(&transaction_id).await;
            page.generate_receipt().await
        }
        ReceiptCommand::GenerateAll => page.generate_all_receipts().await,
        ReceiptCommand::Email {
            transaction_id,
            email,
            subject,
            message,
        } => {
            page.open_email_send(&transaction_id);
            page.email_send_form.email = email;
            if let Some(subject) = subject {
                page.email_send_form.subject = subject;
            }
            page.email_send_form.message = message.unwrap_or_default();
            page.send_receipt_email().await
        }
    }
}

async fn run_org(page: &mut Page, command: OrgCommand) -> PageAction {
    page.open_organization().await;
    match command {
        OrgCommand::Show => {
            let form = &page.organization_form;
            if page.current_organization_id.is_none() {
                println!("No organization saved yet");
            } else {
                println!("{}", form.name);
                println!("EIN:     {}", form.ein);
                println!("Address: {}, {}, {} {}", form.address, form.city, form.state, form.zip);
                println!("Contact: {} {} {}", form.contact, form.phone, form.email);
                println!("Website: {}", form.url);
            }
            PageAction::None
        }
        OrgCommand::Save {
            name,
            ein,
            address,
            city,
            state,
            zip,
            contact,
            phone,
            email,
            url,
        } => {
            let form = &mut page.organization_form;
            if let Some(v) = name {
                form.name = v;
            }
            if let Some(v) = ein {
                form.input_ein(&v);
            }
            if let Some(v) = address {
                form.address = v;
            }
            if let Some(v) = city {
                form.city = v;
            }
            if let Some(v) = state {
                form.state = v;
            }
            if let Some(v) = zip {
                form.input_zip(&v);
            }
            if let Some(v) = contact {
                form.contact = v;
            }
            if let Some(v) = phone {
                form.input_phone(&v);
            }
            if let Some(v) = email {
                form.email = v;
            }
            if let Some(v) = url {
                form.url = v;
            }
            page.save_organization().await
        }
    }
}

async fn run_logo(page: &mut Page, command: LogoCommand) -> anyhow::Result<PageAction> {
    page.open_logo().await;
    let action = match command {
        LogoCommand::Show => {
            match &page.logo_form.current {
                Some(logo) => println!(
                    "{} ({}x{}, {}, {})",
                    logo.filename,
                    logo.width,
                    logo.height,
                    logo.position,
                    receiptdesk_utils::format_file_size(logo.logo.len() as u64)
                ),
                None => println!("No logo uploaded"),
            }
            PageAction::None
        }
        LogoCommand::Upload { path, position } => {
            let position = LogoPosition::from_str(&position).map_err(anyhow::Error::msg)?;
            let file = LogoFile::from_path(&path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            if page.select_logo_file(file).await {
                page.set_logo_position(position);
                page.upload_logo().await
            } else {
                PageAction::None
            }
        }
        LogoCommand::Delete => page.delete_logo().await,
    };
    Ok(action)
}

fn print_table(page: &Page) {
    let rows: Vec<_> = page.table.visible_rows().collect();
    if rows.is_empty() {
        println!("No transactions");
        return;
    }
    println!(
        "{:<10} {:<24} {:<30} {:>12} {:<12}",
        "Date", "Donor", "Email", "Amount", "QB Doc #"
    );
    for row in rows {
        println!(
            "{:<10} {:<24} {:<30} {:>12} {:<12}",
            row.cell(Column::Date),
            row.cell(Column::DonorName),
            row.cell(Column::DonorEmail),
            row.cell(Column::Amount),
            row.cell(Column::QbDocNum)
        );
    }
    if let Some(filter) = page.table.filter() {
        println!("({} of {} shown, filter: {:?})", page.table.visible_count(), page.table.rows().len(), filter);
    }
}

/// Print what the handlers reported and fail if any of it was an error
fn report(page: &mut Page, action: PageAction) -> anyhow::Result<()> {
    let notifications = page.notifier.drain();
    for notification in &notifications {
        eprintln!("[{}] {}", notification.kind, notification.message);
    }

    match action {
        PageAction::Redirect(url) => println!("Open this URL to continue: {}", url),
        PageAction::Reload => log::debug!("Handler requested a reload"),
        PageAction::None => {}
    }

    if notifications
        .iter()
        .any(|n| n.kind == NotificationKind::Error)
    {
        anyhow::bail!("command failed");
    }
    Ok(())
}
