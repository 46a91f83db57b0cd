#![allow(clippy::unwrap_used)]

use kimu::error::SelectionError;
use kimu::geometry::{Circle, Line, Point};
use kimu::math::Decimal;
use kimu::operations::{
    Extent, Feature, IntersectionTool, Selection, ToolOutcome, Verdict, INTERSECTION_LABEL,
};
use kimu::sink::MemorySink;
use kimu::KimuError;
use rust_decimal_macros::dec;

const FRAME: &str = "EPSG:3067";

fn p(x: Decimal, y: Decimal) -> Point {
    Point::new(x, y)
}

fn canvas() -> Extent {
    Extent::new(dec!(-100), dec!(100), dec!(-100), dec!(100)).unwrap()
}

fn loose(points: &[Point]) -> Selection {
    points.iter().map(|pt| Feature::point(*pt, FRAME)).collect()
}

#[test]
fn four_loose_points_are_reviewed_in_pair_order() {
    let selection = loose(&[
        p(dec!(0), dec!(0)),
        p(dec!(4), dec!(0)),
        p(dec!(0), dec!(2)),
        p(dec!(2), dec!(4)),
    ]);
    let tool = IntersectionTool::lines(&selection);
    let candidates = tool.candidates().unwrap();
    assert_eq!(candidates.len(), 3);
    assert!(candidates[0].approx_eq(&p(dec!(-2), dec!(0))));
    assert!(candidates[1].approx_eq(&p(dec!(0), dec!(8))));
    assert!(candidates[2].approx_eq(&p(dec!(0.8), dec!(1.6))));

    let mut reviewed = Vec::new();
    let mut pruner = |_: &Point, label: &str| {
        reviewed.push(label.to_owned());
        if label == "Opt 1" {
            Verdict::Reject
        } else {
            Verdict::Keep
        }
    };
    let mut sink = MemorySink::new();
    let outcome = tool.execute(&canvas(), &mut pruner, &mut sink).unwrap();
    let ToolOutcome::Emitted(point) = outcome else {
        panic!("expected a point, got {outcome:?}");
    };
    assert!(point.approx_eq(&p(dec!(0), dec!(8))));
    assert_eq!(reviewed, ["Opt 1", "Opt 2"]);
    assert_eq!(sink.entries().len(), 1);
    assert_eq!(sink.entries()[0].label, INTERSECTION_LABEL);
}

#[test]
fn rejecting_all_but_one_accepts_the_survivor() {
    let selection = loose(&[
        p(dec!(0), dec!(0)),
        p(dec!(4), dec!(0)),
        p(dec!(0), dec!(2)),
        p(dec!(2), dec!(4)),
    ]);
    let mut asked = 0;
    let mut pruner = |_: &Point, _: &str| {
        asked += 1;
        Verdict::Reject
    };
    let mut sink = MemorySink::new();
    let outcome = IntersectionTool::lines(&selection)
        .execute(&canvas(), &mut pruner, &mut sink)
        .unwrap();
    let ToolOutcome::Emitted(point) = outcome else {
        panic!("expected a point, got {outcome:?}");
    };
    assert!(point.approx_eq(&p(dec!(0.8), dec!(1.6))));
    assert_eq!(asked, 2);
}

#[test]
fn line_through_circle_from_two_points() {
    let selection = loose(&[p(dec!(-10), dec!(3)), p(dec!(10), dec!(3))]);
    let circle = Circle::new(p(dec!(0), dec!(0)), dec!(5)).unwrap();
    let candidates = IntersectionTool::line_circle(&selection, circle)
        .candidates()
        .unwrap();
    // Forward along the line first.
    assert_eq!(candidates.len(), 2);
    assert!(candidates[0].approx_eq(&p(dec!(4), dec!(3))));
    assert!(candidates[1].approx_eq(&p(dec!(-4), dec!(3))));
}

#[test]
fn mixed_frames_are_refused_before_solving() {
    let selection = Selection::new(vec![
        Feature::line(
            Line::new(p(dec!(0), dec!(0)), p(dec!(4), dec!(4))).unwrap(),
            "EPSG:3067",
        ),
        Feature::line(
            Line::new(p(dec!(0), dec!(4)), p(dec!(4), dec!(0))).unwrap(),
            "EPSG:3879",
        ),
    ]);
    let mut keep = |_: &Point, _: &str| Verdict::Keep;
    let err = IntersectionTool::lines(&selection)
        .execute(&canvas(), &mut keep, &mut MemorySink::new())
        .unwrap_err();
    assert!(matches!(
        err,
        KimuError::Selection(SelectionError::MixedFrames { .. })
    ));
}

#[test]
fn survey_coordinates_keep_their_digits() {
    let a = Point::parse("385000.1234567", "6671000.7654321").unwrap();
    let b = a.offset(dec!(2), dec!(2));
    let c = a.offset(dec!(0), dec!(2));
    let d = a.offset(dec!(2), dec!(0));
    let selection = Selection::new(vec![
        Feature::line(Line::new(a, b).unwrap(), FRAME),
        Feature::line(Line::new(c, d).unwrap(), FRAME),
    ]);
    let view = Extent::enclosing(&[a, b]).unwrap();
    let mut keep = |_: &Point, _: &str| Verdict::Keep;
    let mut sink = MemorySink::new();
    let outcome = IntersectionTool::lines(&selection)
        .execute(&view, &mut keep, &mut sink)
        .unwrap();
    let ToolOutcome::Emitted(point) = outcome else {
        panic!("expected a point, got {outcome:?}");
    };
    assert!(point.approx_eq(&p(dec!(385001.1234567), dec!(6671001.7654321))));

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("intersection.csv");
    sink.persist(&path).unwrap();
    let text = std::fs::read_to_string(&path).unwrap();
    assert_eq!(
        text,
        "id,xcoord,ycoord\nIntersection point,385001.123,6671001.765\n"
    );
}

#[test]
fn polylines_intersect_end_to_end() {
    let first = Feature::from_polyline(
        &[p(dec!(0), dec!(0)), p(dec!(1), dec!(3)), p(dec!(4), dec!(4))],
        FRAME,
    )
    .unwrap();
    let second =
        Feature::from_polyline(&[p(dec!(0), dec!(4)), p(dec!(4), dec!(0))], FRAME).unwrap();
    let selection = Selection::new(vec![first, second]);
    let candidates = IntersectionTool::lines(&selection).candidates().unwrap();
    assert_eq!(candidates.len(), 1);
    assert!(candidates[0].approx_eq(&p(dec!(2), dec!(2))));
}
