use glam::Vec2;
use glasskit::shape::{PathCommand, ShapeVariant, ALL_VARIANTS, TAB_CORNER_OFFSET};

fn command_points(cmd: &PathCommand) -> Vec<Vec2> {
    match *cmd {
        PathCommand::MoveTo(p) | PathCommand::LineTo(p) => vec![p],
        PathCommand::CubicTo { c1, c2, to } => vec![c1, c2, to],
        PathCommand::QuadTo { ctrl, to } => vec![ctrl, to],
        PathCommand::Close => vec![],
    }
}

#[test]
fn frame_matches_target_for_all_variants() {
    let targets = [(362.0, 223.0), (500.0, 300.0), (100.0, 640.0), (181.0, 111.5)];
    for variant in ALL_VARIANTS {
        for (w, h) in targets {
            let outline = variant.outline(w, h);
            let frame = outline.frame();
            assert!((frame.width() - w).abs() < 1e-5, "{:?} width at {}x{}", variant, w, h);
            assert!((frame.height() - h).abs() < 1e-5, "{:?} height at {}x{}", variant, w, h);

            // Control points may overshoot the frame by a hair (the folder's
            // leading curve is authored slightly outside), never by more.
            let mx = w * 0.02 + 2.0;
            let my = h * 0.02 + 2.0;
            for cmd in outline.commands() {
                for p in command_points(cmd) {
                    assert!(
                        p.x >= -mx && p.x <= w + mx && p.y >= -my && p.y <= h + my,
                        "{:?} point {:?} escapes {}x{}",
                        variant,
                        p,
                        w,
                        h
                    );
                }
            }
        }
    }
}

#[test]
fn generation_is_deterministic() {
    for variant in ALL_VARIANTS {
        let a = variant.outline(313.7, 209.4);
        let b = variant.outline(313.7, 209.4);
        assert_eq!(a, b, "{:?} generation must be pure", variant);
    }
}

#[test]
fn folder_at_design_size_reproduces_authored_points() {
    let (dw, dh) = ShapeVariant::Folder.design_size();
    assert_eq!((dw, dh), (362.0, 223.0));
    let outline = ShapeVariant::Folder.outline(dw, dh);
    let cmds = outline.commands();

    // move, six line/cubic pairs, close
    assert_eq!(cmds.len(), 14);
    assert_eq!(cmds[0], PathCommand::MoveTo(Vec2::new(170.664, 0.0)));
    assert_eq!(cmds[1], PathCommand::LineTo(Vec2::new(30.002, 0.0)));
    match cmds[8] {
        PathCommand::CubicTo { c1, c2, to } => {
            assert!((c1.x - 363.973).abs() < 1e-4);
            assert!((c1.y - 67.772).abs() < 1e-4);
            assert!((c2.x - 350.02).abs() < 1e-4);
            assert!((to.x - 332.001).abs() < 1e-4);
            assert!((to.y - 52.0).abs() < 1e-4);
        }
        ref other => panic!("expected CubicTo, got {:?}", other),
    }
    assert_eq!(cmds[13], PathCommand::Close);
}

#[test]
fn tab_corner_sits_at_authored_offset() {
    let targets = [(380.0, 240.0), (760.0, 120.0), (190.0, 480.0), (57.3, 901.1)];
    for (w, h) in targets {
        let outline = ShapeVariant::FolderTab.outline(w, h);
        let cmds = outline.commands();

        let quad_idx = cmds
            .iter()
            .position(|c| matches!(c, PathCommand::QuadTo { .. }))
            .expect("FolderTab outline must contain the rounded notch");
        let (anchor, corner) = match cmds[quad_idx] {
            PathCommand::QuadTo { ctrl, to } => (ctrl, to),
            _ => unreachable!(),
        };

        let dist = (corner - anchor).length();
        assert!(
            (dist - TAB_CORNER_OFFSET).abs() < 1e-3,
            "corner offset {} at {}x{}",
            dist,
            w,
            h
        );

        // The corner lies on the segment toward the slant end
        let slant_end = match cmds[quad_idx + 1] {
            PathCommand::LineTo(p) => p,
            ref other => panic!("expected LineTo after the notch, got {:?}", other),
        };
        let dir = corner - anchor;
        let full = slant_end - anchor;
        assert!(dir.perp_dot(full).abs() < 1e-2, "corner off the slant at {}x{}", w, h);
        assert!(dir.dot(full) > 0.0);
    }
}

#[test]
fn degenerate_targets_generate_without_panicking() {
    for variant in ALL_VARIANTS {
        for (w, h) in [(0.0, 0.0), (0.0, 100.0), (250.0, 0.0)] {
            let outline = variant.outline(w, h);
            assert!(!outline.commands().is_empty());
            let _ = outline.to_skia_path();
        }
    }
}
