use std::process;

fn main() {
    match doc_outline_cli::run() {
        Ok(code) => process::exit(code),
        Err(err) => {
            eprintln!("doc-outline error: {err:#}");
            process::exit(1);
        }
    }
}
