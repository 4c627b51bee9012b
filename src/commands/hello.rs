use crate::cli::HelloArgs;

/// `Hello, <name>!`, optionally shouted
pub fn greeting(name: &str, uppercase: bool) -> String {
    let message = format!("Hello, {name}!");
    if uppercase {
        message.to_uppercase()
    } else {
        message
    }
}

pub fn execute(args: &HelloArgs) {
    println!("{}", greeting(&args.name, args.uppercase));
}
