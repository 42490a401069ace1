use std::process::ExitCode;

fn main() -> ExitCode {
    match yolo2coco::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}
