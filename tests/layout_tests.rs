//! Layout and glyph dictionary loading tests

use grid_traffic::simulation::{
    parse_layout, Coord, Direction, Glyph, GlyphDictionary, SimConfig, SimError, SimWorld,
    DEMO_DICTIONARY, DEMO_LAYOUT,
};

const STRUCTURED_DICTIONARY: &str = r##"{
    ">": { "road": "Right" },
    "^": { "road": "Up" },
    "L": { "light": { "period": 3, "green": true } },
    "l": { "light": { "period": 2 } },
    "#": "Obstacle",
    "D": "Destination"
}"##;

#[test]
fn test_first_text_row_is_top_of_grid() {
    let dictionary = GlyphDictionary::from_json(STRUCTURED_DICTIONARY).unwrap();
    let grid = parse_layout("#D\n>^\n", &dictionary).unwrap();

    assert_eq!(grid.width(), 2);
    assert_eq!(grid.height(), 2);
    assert!(grid.has_obstacle(Coord::new(0, 1)));
    assert!(grid.has_destination(Coord::new(1, 1)));
    assert_eq!(grid.road_at(Coord::new(0, 0)), Some(Direction::Right));
    assert_eq!(grid.road_at(Coord::new(1, 0)), Some(Direction::Up));
}

#[test]
fn test_unknown_glyphs_leave_cells_empty() {
    let dictionary = GlyphDictionary::from_json(STRUCTURED_DICTIONARY).unwrap();
    let grid = parse_layout("? \n>x", &dictionary).unwrap();

    assert!(grid.occupants_at(Coord::new(0, 1)).is_empty());
    assert!(grid.occupants_at(Coord::new(1, 1)).is_empty());
    assert!(grid.occupants_at(Coord::new(1, 0)).is_empty());
    assert_eq!(grid.occupants_at(Coord::new(0, 0)).len(), 1);
}

#[test]
fn test_ragged_layout_is_rejected() {
    let dictionary = GlyphDictionary::from_json(STRUCTURED_DICTIONARY).unwrap();
    assert!(matches!(
        parse_layout(">>>\n>>\n", &dictionary),
        Err(SimError::Configuration(_))
    ));
}

#[test]
fn test_empty_layout_is_rejected() {
    let dictionary = GlyphDictionary::from_json(STRUCTURED_DICTIONARY).unwrap();
    assert!(matches!(
        parse_layout("", &dictionary),
        Err(SimError::Configuration(_))
    ));
    assert!(matches!(
        parse_layout("\n\n", &dictionary),
        Err(SimError::Configuration(_))
    ));
}

#[test]
fn test_structured_light_entries() {
    let dictionary = GlyphDictionary::from_json(STRUCTURED_DICTIONARY).unwrap();

    assert_eq!(
        dictionary.get('L'),
        Some(&Glyph::Light {
            period: 3,
            green: true
        })
    );
    // Phase defaults to red
    assert_eq!(
        dictionary.get('l'),
        Some(&Glyph::Light {
            period: 2,
            green: false
        })
    );
}

#[test]
fn test_legacy_light_phase_follows_glyph_case() {
    let dictionary = GlyphDictionary::from_json(DEMO_DICTIONARY).unwrap();

    assert_eq!(
        dictionary.get('S'),
        Some(&Glyph::Light {
            period: 7,
            green: false
        })
    );
    assert_eq!(
        dictionary.get('s'),
        Some(&Glyph::Light {
            period: 5,
            green: true
        })
    );
    assert_eq!(dictionary.get('v'), Some(&Glyph::Road(Direction::Down)));
    assert_eq!(dictionary.get('#'), Some(&Glyph::Obstacle));
    assert_eq!(dictionary.get('D'), Some(&Glyph::Destination));
}

#[test]
fn test_bad_dictionaries_are_rejected() {
    assert!(matches!(
        GlyphDictionary::from_json(r#"{ ">": "Sideways" }"#),
        Err(SimError::Configuration(_))
    ));
    assert!(matches!(
        GlyphDictionary::from_json(r#"{ "S": 0 }"#),
        Err(SimError::Configuration(_))
    ));
    assert!(matches!(
        GlyphDictionary::from_json(r#"{ ">>": "Right" }"#),
        Err(SimError::Configuration(_))
    ));
    assert!(matches!(
        GlyphDictionary::from_json("not json"),
        Err(SimError::Json(_))
    ));
}

#[test]
fn test_missing_layout_file_is_an_io_error() {
    let result = SimWorld::from_files(
        "/nonexistent/layout.txt",
        "/nonexistent/dictionary.json",
        SimConfig::default(),
    );
    let error = result.err().unwrap();
    assert!(matches!(error, SimError::Io(_)));
    assert!(error.is_fatal());
}

#[test]
fn test_demo_city_layout() {
    let dictionary = GlyphDictionary::from_json(DEMO_DICTIONARY).unwrap();
    let grid = parse_layout(DEMO_LAYOUT, &dictionary).unwrap();

    assert_eq!((grid.width(), grid.height()), (10, 7));
    assert_eq!(
        grid.destinations(),
        vec![
            Coord::new(1, 1),
            Coord::new(1, 5),
            Coord::new(8, 1),
            Coord::new(8, 5)
        ]
    );
    assert_eq!(grid.traffic_lights().count(), 4);
    assert!(grid.has_obstacle(Coord::new(2, 3)));
    // Uppercase lights start red, lowercase green
    assert!(grid.has_red_light(Coord::new(4, 6)));
    assert!(!grid.has_red_light(Coord::new(0, 3)));
}
