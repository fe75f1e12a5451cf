//! Places openings in a small two-document model and prints what happened.
//!
//! ```text
//! cargo run --example walkthrough
//! RUST_LOG=holeplacer=debug cargo run --example walkthrough
//! ```

use holeplacer::geometry::{LineSegment, LocationCurve};
use holeplacer::host::TracingNotifier;
use holeplacer::math::Point3;
use holeplacer::model::{
    Category, DuctData, DuctProfile, FamilySymbol, LevelData, PipeData, View3dData, WallData,
};
use holeplacer::{AddHoles, CommandResult, HoleConfig, Workspace};

fn straight(from: Point3, to: Point3) -> LocationCurve {
    LocationCurve::Line(LineSegment::new(from, to))
}

fn build() -> Workspace {
    let mut ws = Workspace::new("Office-AR");

    let doc = ws.active_mut();
    let ground = doc.add(LevelData {
        name: "Ground".into(),
        elevation: 0.0,
    });
    for x in [4.0, 9.0] {
        doc.add(WallData {
            location: LineSegment::new(Point3::new(x, -6.0, 0.0), Point3::new(x, 6.0, 0.0)),
            thickness: 0.25,
            height: 3.2,
            base_offset: 0.0,
            level: ground,
        });
    }
    doc.add(View3dData {
        name: "{3D}".into(),
        is_template: false,
        section_box: None,
    });
    doc.add(FamilySymbol {
        family_name: "Opening".into(),
        type_name: "Rectangular".into(),
        category: Category::GenericModel,
        parameters: vec!["Width".into(), "Height".into()],
    });

    let mep = ws.add_document("Office-MEP");
    if let Ok(doc) = ws.document_mut(mep) {
        doc.add(DuctData {
            location: straight(Point3::new(0.0, 0.0, 2.5), Point3::new(12.0, 0.0, 2.5)),
            profile: DuctProfile::Rectangular {
                width: 0.6,
                height: 0.3,
            },
        });
        doc.add(PipeData {
            location: straight(Point3::new(0.0, 2.0, 0.8), Point3::new(6.0, 2.0, 0.8)),
            diameter: 0.1,
        });
    }
    ws
}

fn main() {
    // Default: WARN for everything, INFO for holeplacer.
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("holeplacer=info".parse().unwrap_or_default());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let mut ws = build();
    match AddHoles::new(HoleConfig::english()).run(&mut ws, &TracingNotifier) {
        CommandResult::Succeeded(report) => {
            println!(
                "{} conduits, {} hits cast, {} kept, {} skipped",
                report.conduits,
                report.hits_cast,
                report.hits_kept,
                report.skipped.len()
            );
            for opening in &report.openings {
                println!(
                    "opening {:?} at ({:.2}, {:.2}, {:.2}) {:.2} x {:.2}",
                    opening.id,
                    opening.point.x,
                    opening.point.y,
                    opening.point.z,
                    opening.width,
                    opening.height
                );
            }
        }
        CommandResult::Cancelled(failures) => println!("cancelled: {failures}"),
        CommandResult::Failed(err) => println!("failed: {err}"),
    }
}
