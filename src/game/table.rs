//! Text indicators around the table: instructions, side names, "WAR!",
//! the per-side "wins" markers and the game-over or draw banner.

use crate::core::{Layout, Side, SideMap};
use crate::scene::{Color, Drawable, Renderer, Scene, Shape};

const INSTRUCTIONS: &str = "Click to play";
const WAR: &str = "WAR!";
const WINS: &str = "wins";
const DRAW: &str = "Nobody wins the game";

/// Baseline rows of the fixed labels.
const INSTRUCTIONS_ROW: i32 = 20;
const WAR_ROW: i32 = 80;
const BANNER_ROW: i32 = 140;
const NAME_ROW: i32 = 153;
/// "wins" markers sit this far right of a side's reveal column.
const WINS_INSET: i32 = 50;

/// All text indicators of one session.
#[derive(Clone, Debug)]
pub struct Table {
    instructions: Shape,
    war: Shape,
    names: SideMap<Shape>,
    round_wins: SideMap<Shape>,
    war_wins: SideMap<Shape>,
    banner: Shape,
    canvas_width: i32,
}

impl Table {
    /// Create every label, hidden.
    pub fn new<R: Renderer>(scene: &mut Scene<R>, layout: &Layout) -> Self {
        let mut instructions = Shape::text(scene, INSTRUCTIONS, 0, INSTRUCTIONS_ROW, 20, Color::BLACK);
        center(scene, &mut instructions, layout.canvas_width);
        let mut war = Shape::text(scene, WAR, 0, WAR_ROW, 50, Color::RED);
        center(scene, &mut war, layout.canvas_width);

        let names = SideMap::new(|side| {
            Shape::text(scene, side.to_string(), layout.column_x(side), NAME_ROW, 15, Color::BLACK)
        });
        let round_wins = SideMap::new(|side| {
            let x = layout.column_x(side) + WINS_INSET;
            Shape::text(scene, WINS, x, layout.round_row - 10, 20, Color::GREEN)
        });
        let war_wins = SideMap::new(|side| {
            let x = layout.column_x(side) + WINS_INSET;
            Shape::text(scene, WINS, x, layout.war_row - 7, 20, Color::GREEN)
        });
        let banner = Shape::text(scene, "", 0, BANNER_ROW, 30, Color::BLACK);

        Self {
            instructions,
            war,
            names,
            round_wins,
            war_wins,
            banner,
            canvas_width: layout.canvas_width,
        }
    }

    /// Show the labels of a fresh game.
    pub fn show_intro<R: Renderer>(&mut self, scene: &mut Scene<R>) {
        self.instructions.show(scene);
        for (_, name) in self.names.iter_mut() {
            name.show(scene);
        }
    }

    /// Hide the war and win markers left over from the previous round.
    pub fn clear_round<R: Renderer>(&mut self, scene: &mut Scene<R>) {
        self.war.hide(scene);
        for side in Side::ALL {
            self.round_wins[side].hide(scene);
            self.war_wins[side].hide(scene);
        }
    }

    pub fn show_war<R: Renderer>(&mut self, scene: &mut Scene<R>) {
        self.war.show(scene);
    }

    /// Mark `winner` as taking a plain round.
    pub fn show_round_win<R: Renderer>(&mut self, scene: &mut Scene<R>, winner: Side) {
        self.round_wins[winner].show(scene);
        self.round_wins[winner.opponent()].hide(scene);
    }

    /// Mark `winner` as taking a war.
    pub fn show_war_win<R: Renderer>(&mut self, scene: &mut Scene<R>, winner: Side) {
        self.war_wins[winner].show(scene);
        self.war_wins[winner.opponent()].hide(scene);
    }

    /// Announce the winner of the game.
    pub fn show_banner<R: Renderer>(&mut self, scene: &mut Scene<R>, winner: Side) {
        let text = match winner {
            Side::Player => "Player wins the game!",
            Side::Computer => "Computer wins the game!",
        };
        self.announce(scene, text);
    }

    /// Announce a drawn game.
    pub fn show_draw_banner<R: Renderer>(&mut self, scene: &mut Scene<R>) {
        self.announce(scene, DRAW);
    }

    fn announce<R: Renderer>(&mut self, scene: &mut Scene<R>, text: &str) {
        self.banner.set_text(scene, text);
        center(scene, &mut self.banner, self.canvas_width);
        self.banner.show(scene);
    }

    pub fn hide_all<R: Renderer>(&mut self, scene: &mut Scene<R>) {
        self.instructions.hide(scene);
        self.banner.hide(scene);
        self.clear_round(scene);
        for (_, name) in self.names.iter_mut() {
            name.hide(scene);
        }
    }

    #[must_use]
    pub fn instructions(&self) -> &Shape {
        &self.instructions
    }

    #[must_use]
    pub fn war_indicator(&self) -> &Shape {
        &self.war
    }

    #[must_use]
    pub fn round_win_indicator(&self, side: Side) -> &Shape {
        &self.round_wins[side]
    }

    #[must_use]
    pub fn war_win_indicator(&self, side: Side) -> &Shape {
        &self.war_wins[side]
    }

    #[must_use]
    pub fn banner(&self) -> &Shape {
        &self.banner
    }
}

fn center<R: Renderer>(scene: &mut Scene<R>, label: &mut Shape, canvas_width: i32) {
    let x = (canvas_width - label.width()) / 2;
    let y = label.y();
    label.set_position(scene, x, y);
}
