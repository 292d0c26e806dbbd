use std::process;

fn main() {
    match url_hash_cli::run() {
        Ok(code) => process::exit(code),
        Err(err) => {
            eprintln!("url-hash error: {err:#}");
            process::exit(1);
        }
    }
}
