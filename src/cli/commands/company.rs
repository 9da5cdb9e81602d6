use crate::cli::parser::{CompanyAction, Commands};
use crate::config::Config;
use crate::core::company::{CompanyFields, CompanyLogic};
use crate::core::{ask_confirmation, audit, open_store, ready_database};
use crate::errors::AppResult;
use crate::ui::messages::{info, success};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Company { action } = cmd else {
        return Ok(());
    };

    let store = open_store(cfg)?;
    let db = ready_database(&store);

    match action {
        CompanyAction::Set(args) => {
            let fields = CompanyFields {
                name: args.name.clone(),
                tax_id: args.tax_id.clone(),
                address: args.address.clone(),
                operating_period: args.period.clone(),
                primary_activity: args.activity.clone(),
            };
            let saved = CompanyLogic::set(&db, fields)?;
            audit(&store, "company_set", &saved.name, "Company data saved");
            success(format!("Company '{}' saved.", saved.name));
        }
        CompanyAction::Show => CompanyLogic::show(&db)?,
        CompanyAction::Clear { yes } => {
            if !yes && !ask_confirmation("Remove the company record?") {
                info("Operation cancelled.");
                return Ok(());
            }
            CompanyLogic::clear(&db)?;
            audit(&store, "company_clear", "", "Company data removed");
            success("Company record removed.");
        }
    }

    Ok(())
}
