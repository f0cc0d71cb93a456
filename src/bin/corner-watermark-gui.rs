//! Graphical front end: collects the folder and placement settings,
//! then runs the same directory processor as the CLI.

use std::path::PathBuf;
use std::process;

use corner_watermark::{default_output_dir, Corner, ProcessOptions, WatermarkEngine};

slint::slint! {
    import { Button, ComboBox, HorizontalBox, LineEdit, VerticalBox } from "std-widgets.slint";

    export component MainWindow inherits Window {
        title: "Watermarking tool";
        width: 460px;

        in-out property <color> status-color: #2a7a2a;
        in-out property <string> status-text;

        callback run-clicked(string, string, string, string, string);

        VerticalBox {
            Text {
                text: "Add watermarks";
                font-size: 26px;
                horizontal-alignment: center;
            }
            HorizontalBox {
                Text { text: "Folder:"; vertical-alignment: center; }
                folder-edit := LineEdit { placeholder-text: "Folder with photos"; }
            }
            HorizontalBox {
                Text { text: "Width:"; vertical-alignment: center; }
                width-edit := LineEdit { text: "0.15"; }
                Text { text: "Height:"; vertical-alignment: center; }
                height-edit := LineEdit { text: "0.15"; }
            }
            HorizontalBox {
                Text { text: "Opacity:"; vertical-alignment: center; }
                opacity-edit := LineEdit { text: "0.5"; }
                Text { text: "Corners:"; vertical-alignment: center; }
                corners-box := ComboBox {
                    model: ["all", "top", "bottom", "left", "right"];
                    current-value: "all";
                }
            }
            Button {
                text: "Add watermarks";
                clicked => {
                    root.run-clicked(
                        folder-edit.text,
                        width-edit.text,
                        height-edit.text,
                        opacity-edit.text,
                        corners-box.current-value);
                }
            }
            Text {
                text: root.status-text;
                color: root.status-color;
                wrap: word-wrap;
            }
        }
    }
}

fn parse_proportion(text: &str, name: &str) -> Result<f32, String> {
    text.trim()
        .parse::<f32>()
        .map_err(|_| format!("{name} must be a number between 0.0 and 1.0"))
}

fn corners_for(choice: &str) -> Vec<Corner> {
    match choice {
        "top" => vec![Corner::UpperLeft, Corner::UpperRight],
        "bottom" => vec![Corner::LowerLeft, Corner::LowerRight],
        "left" => vec![Corner::UpperLeft, Corner::LowerLeft],
        "right" => vec![Corner::UpperRight, Corner::LowerRight],
        _ => Corner::ALL.to_vec(),
    }
}

fn run_batch(
    folder: &str,
    width: &str,
    height: &str,
    opacity: &str,
    corners: &str,
) -> Result<String, String> {
    let folder = PathBuf::from(folder.trim());
    if !folder.is_dir() {
        return Err(format!("{} is not a directory", folder.display()));
    }

    let opts = ProcessOptions {
        width_proportion: parse_proportion(width, "Width")?,
        height_proportion: parse_proportion(height, "Height")?,
        opacity: parse_proportion(opacity, "Opacity")?,
        corners: corners_for(corners),
        ..ProcessOptions::default()
    };
    opts.validate().map_err(|e| e.to_string())?;

    let engine = WatermarkEngine::new().map_err(|e| e.to_string())?;
    let results = engine.process_directory(&folder, &default_output_dir(&folder), &opts);

    let failed: Vec<_> = results.iter().filter(|r| !r.success).collect();
    if let Some(first) = failed.first() {
        return Err(format!(
            "{} photo(s) failed, first: {}",
            failed.len(),
            first.message
        ));
    }

    let processed = results.iter().filter(|r| !r.skipped).count();
    Ok(format!("Added watermarks to {processed} photo(s)"))
}

fn main() {
    env_logger::init();

    let ui = match MainWindow::new() {
        Ok(ui) => ui,
        Err(e) => {
            eprintln!("Fatal: Failed to create window: {e}");
            process::exit(1);
        }
    };

    let weak = ui.as_weak();
    ui.on_run_clicked(move |folder, width, height, opacity, corners| {
        let ui = weak.unwrap();
        match run_batch(&folder, &width, &height, &opacity, &corners) {
            Ok(msg) => {
                ui.set_status_color(slint::Color::from_rgb_u8(42, 122, 42));
                ui.set_status_text(msg.into());
            }
            Err(msg) => {
                ui.set_status_color(slint::Color::from_rgb_u8(178, 34, 34));
                ui.set_status_text(msg.into());
            }
        }
    });

    if let Err(e) = ui.run() {
        eprintln!("Fatal: {e}");
        process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corners_for_maps_choices() {
        assert_eq!(corners_for("all").len(), 4);
        assert_eq!(corners_for("top"), vec![Corner::UpperLeft, Corner::UpperRight]);
        assert_eq!(corners_for("unknown").len(), 4);
    }

    #[test]
    fn parse_proportion_rejects_garbage() {
        assert!(parse_proportion("0.3", "Width").is_ok());
        assert!(parse_proportion("abc", "Width").is_err());
    }

    #[test]
    fn run_batch_rejects_missing_folder() {
        let err = run_batch("/nonexistent", "0.15", "0.15", "0.5", "all").unwrap_err();
        assert!(err.contains("not a directory"));
    }
}
