use crate::cli::args::CliArgs;
use crate::view::ViewFormat;

pub fn validate(args: &CliArgs) -> Result<(), String> {
    if let Some(raw) = args.format.as_deref() {
        if ViewFormat::parse(raw).is_none() {
            return Err(format!(
                "invalid --format '{raw}', expected text, json or html"
            ));
        }
    }
    let given = [&args.users, &args.categories, &args.products]
        .iter()
        .filter(|p| p.is_some())
        .count();
    if given != 0 && given != 3 {
        return Err("--users, --categories and --products must be given together".to_string());
    }
    if let Some(user) = args.user.as_deref() {
        if user.trim().is_empty() {
            return Err("invalid --user, expected an id, a name or 'all'".to_string());
        }
    }
    Ok(())
}
