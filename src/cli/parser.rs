use crate::models::BackupKind;
use clap::{Args, Parser, Subcommand};

/// Command-line interface definition for bishop
/// Shift scheduling for a single company, stored locally in SQLite
#[derive(Parser)]
#[command(
    name = "bishop",
    version = env!("CARGO_PKG_VERSION"),
    about = "Employee shift scheduling with a local, versioned, sync-ready store",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Register, show or remove the company
    Company {
        #[command(subcommand)]
        action: CompanyAction,
    },

    /// Manage employees
    Employee {
        #[command(subcommand)]
        action: EmployeeAction,
    },

    /// Mark and inspect weekly schedules
    Schedule {
        #[command(subcommand)]
        action: ScheduleAction,
    },

    /// Create, list or restore stored backups
    Backup {
        #[arg(long, value_enum, default_value = "manual")]
        kind: BackupKind,

        /// Also write the snapshot to this file
        #[arg(long, value_name = "FILE")]
        file: Option<String>,

        #[arg(long, requires = "file")]
        compress: bool,

        #[arg(long, conflicts_with_all = ["restore", "file"])]
        list: bool,

        /// Restore the snapshot with this id
        #[arg(long, value_name = "ID", conflicts_with = "file")]
        restore: Option<String>,
    },

    /// Export everything to a JSON document
    Export {
        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long, short = 'f')]
        force: bool,

        #[arg(long)]
        compress: bool,
    },

    /// Import a JSON document produced by `export`
    Import {
        #[arg(long, value_name = "FILE")]
        file: String,
    },

    /// Show storage figures and migration status
    Info,

    /// List records not yet synchronized
    Sync,

    /// Delete all employees (a backup is taken first)
    Clear {
        #[arg(long, short = 'y', help = "Do not ask for confirmation")]
        yes: bool,
    },

    /// Print or manage the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },
}

#[derive(Subcommand)]
pub enum CompanyAction {
    /// Register the company or change some of its fields
    Set(CompanyArgs),
    Show,
    Clear {
        #[arg(long, short = 'y')]
        yes: bool,
    },
}

#[derive(Args, Default)]
pub struct CompanyArgs {
    #[arg(long)]
    pub name: Option<String>,

    /// CNPJ
    #[arg(long = "tax-id")]
    pub tax_id: Option<String>,

    #[arg(long)]
    pub address: Option<String>,

    #[arg(long)]
    pub period: Option<String>,

    #[arg(long)]
    pub activity: Option<String>,
}

#[derive(Subcommand)]
pub enum EmployeeAction {
    /// Register an employee of the company
    Add {
        #[arg(long)]
        name: String,

        #[arg(long)]
        sector: String,

        #[arg(long)]
        role: String,

        /// CTPS number
        #[arg(long)]
        ctps: String,

        /// Admission date (YYYY-MM-DD or DD/MM/YYYY)
        #[arg(long)]
        admission: String,

        #[arg(long)]
        compensation: Option<String>,
    },

    /// Change an employee (id or unique id prefix)
    Edit {
        id: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        sector: Option<String>,

        #[arg(long)]
        role: Option<String>,

        #[arg(long)]
        ctps: Option<String>,

        #[arg(long)]
        admission: Option<String>,

        #[arg(long)]
        compensation: Option<String>,

        /// Refuse the edit unless the stored version is this one
        #[arg(long = "expect-version")]
        expect_version: Option<u64>,
    },

    /// Delete an employee (id or unique id prefix)
    Del {
        id: String,

        #[arg(long, short = 'y')]
        yes: bool,
    },

    List {
        #[arg(long)]
        sector: Option<String>,
    },

    /// Counts per sector and role, recent admissions
    Summary,
}

#[derive(Subcommand)]
pub enum ScheduleAction {
    /// Mark slots ("18:00", "22:00-02:00", comma separated) for an employee
    Mark {
        #[arg(long)]
        sector: String,

        /// Day of the week (e.g. SEGUNDA-FEIRA, sabado, monday)
        #[arg(long)]
        day: String,

        #[arg(long)]
        employee: String,

        #[arg(required = true)]
        slots: Vec<String>,

        #[arg(long, help = "Unmark the given slots instead")]
        unmark: bool,
    },

    Show {
        #[arg(long)]
        sector: String,

        #[arg(long)]
        day: String,

        #[arg(long, help = "Also print the slot grid")]
        grid: bool,
    },

    /// List saved (sector, day) pairs
    List {
        #[arg(long, help = "Recompute the list from the saved schedules")]
        rebuild: bool,
    },

    /// Write the schedules alone to a JSON document
    Export {
        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long, help = "Export the copies left in the previous storage layout")]
        legacy: bool,

        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Remove schedule copies left in the previous storage layout
    Clear {
        #[arg(long, short = 'y')]
        yes: bool,
    },
}
