use galaxy::hand::{parse_tiles, tiles_to_string};
use galaxy::tile::Tile;
use galaxy::{GalaxyRule, HandForm, MentsuKind, WaitShape};

fn waits(s: &str) -> Vec<galaxy::Wait> {
    GalaxyRule::default().solve_waits(&parse_tiles(s).unwrap())
}

#[test]
fn single_waits() {
    let test_one = |s: &str, form: HandForm, shape: WaitShape, waiting: &str| {
        let ret = waits(s);
        assert_eq!(ret.len(), 1, "failed for {s}: {ret:#?}");
        assert_eq!(ret[0].form, form, "failed for {s}");
        assert_eq!(ret[0].shape, shape, "failed for {s}");
        assert_eq!(tiles_to_string(&ret[0].waiting), waiting, "failed for {s}");
    };
    test_one("1p2p3p7p8p9p1w2w3w4s6s9s9s", HandForm::Normal, WaitShape::Kanchan, "5s");
    test_one("1p2p3p7p8p9p1w2w3w2s3s9s9s", HandForm::Normal, WaitShape::Ryanmen, "1s4s");
    test_one("4p5p6p7p8p9p1w2w3w1s2s9s9s", HandForm::Normal, WaitShape::Penchan, "3s");
    test_one("1p2p3p4p5p6p7p8p9p1s1s1sh", HandForm::Normal, WaitShape::Tanki, "h");
    test_one("1p2p3p4p5p6p7p8p9p1s1s5w5w", HandForm::Normal, WaitShape::Shanpon, "5w1s");
    test_one("1s1s2s2s4s4s5s5s7s7s8s8sh", HandForm::Chiitoi, WaitShape::Tanki, "h");
    test_one("1w9w1p9p1s9swwsenbl", HandForm::Kokushi, WaitShape::KokushiIchimen, "h");
    test_one(
        "1w9w1p9p1s9swsenblh",
        HandForm::Kokushi,
        WaitShape::KokushiJuusanmen,
        "1w9w1p9p1s9swsenblh",
    );
}

#[test]
fn wait_mentsu() {
    let ret = waits("1p2p3p7p8p9p1w2w3w4s6s9s9s");
    let kinds: Vec<_> = ret[0].mentsu.iter().map(|m| m.kind).collect();
    assert_eq!(kinds.len(), 5);
    assert_eq!(kinds[0], MentsuKind::Toitsu);
    assert_eq!(kinds[4], MentsuKind::Taatsu);

    let ret = waits("1w9w1p9p1s9swsenblh");
    assert_eq!(ret[0].mentsu.len(), 13);
    assert!(ret[0].mentsu.iter().all(|m| m.kind == MentsuKind::Kokushi));
}

#[test]
fn galaxy_taatsu() {
    let ret = waits("1p2p3p7p8p9p1w2w3w2sg3sg9s9s");
    assert!(!ret.is_empty());
    assert!(ret.iter().all(|w| w.shape == WaitShape::Ryanmen));
    let tiles = GalaxyRule::default().waiting_tiles(&parse_tiles("1p2p3p7p8p9p1w2w3w2sg3sg9s9s").unwrap());
    assert_eq!(tiles_to_string(&tiles), "1w4w1p4p1s4s");
}

#[test]
fn completing_tiles_are_plain() {
    for s in ["1p2p3p7p8p9p1w2w3w2sg3sg9s9s", "1s1sg2pg2s4s4s5s5s7s7s8s8sng", "1wg9w1p9p1s9swsenblhg"] {
        for w in waits(s) {
            assert!(w.waiting.iter().all(|t| t.flags().is_empty()), "failed for {s}: {w:?}");
        }
    }
}

#[test]
fn no_wait() {
    assert!(waits("1p3p5p7p9p1w3w5w7w9w1s3s5s").is_empty());
    assert!(waits("").is_empty());
}

#[test]
fn matches_brute_force() {
    let rule = GalaxyRule::default();
    for s in [
        "2p3p4p6p7p8p5s5s5s9w9w3s4s",
        "1s1s1s2s3s4s5s6s7s8s9s9s9s",
        "1s1s2s2s4s4s5s5s7s7s8s8sh",
        "1w9w1p9p1s9swsenblh",
        "2s3s4s5s6s7s8s8s8sbbb1p",
        "1s1sg2s3s4s5w6w7wllhhh",
    ] {
        let tiles = parse_tiles(s).unwrap();
        let brute: Vec<Tile> = rule.solve_agari_tiles(&tiles).into_iter().map(|(t, _)| t).collect();
        assert_eq!(rule.waiting_tiles(&tiles), brute, "failed for {s}");
    }
}

#[test]
fn rule_switches() {
    let rule = GalaxyRule {
        chiitoi: false,
        kokushi: false,
        ..Default::default()
    };
    assert!(rule.solve_waits(&parse_tiles("1s1s2s2s4s4s5s5s7s7s8s8sh").unwrap()).is_empty());
    assert!(rule.solve_waits(&parse_tiles("1w9w1p9p1s9swsenblh").unwrap()).is_empty());
}

#[test]
fn json() {
    let ret = waits("1p2p3p7p8p9p1w2w3w4s6s9s9s");
    let v = serde_json::to_value(&ret[0]).unwrap();
    assert_eq!(v["shape"], "Kanchan");
    assert_eq!(v["form"], "Normal");
    assert_eq!(v["waiting"][0], "5s");
}
