use crate::render::{Canvas, Rgb, Style};
use crate::theme::AccentTag;
use rand::Rng;
use rand::seq::SliceRandom;
use std::f32::consts::TAU;
use std::time::Duration;

const PERIOD_SECS: f32 = 3.0;
const GLYPHS: [char; 3] = ['·', '•', '∙'];

struct Particle
{
    /// Position as a fraction of the canvas size.
    x: f32,
    y: f32,
    color: Rgb,
    glyph: char,
    /// Start offset into the bob cycle, in seconds.
    delay: f32,
    brightness: f32,
}

/// Decorative dots that drift up and down behind the hub.
pub struct Particles
{
    items: Vec<Particle>,
}

impl Particles
{
    pub fn new(rng: &mut impl Rng, count: usize) -> Self
    {
        let items = (0..count)
            .map(|_| {
                let tag = AccentTag::ALL.choose(rng).copied().unwrap_or_default();
                Particle {
                    x: rng.gen_range(0.05..0.95),
                    y: rng.gen_range(0.1..0.9),
                    color: tag.theme().accent,
                    glyph: GLYPHS.choose(rng).copied().unwrap_or('·'),
                    delay: rng.gen_range(0.0..PERIOD_SECS),
                    brightness: rng.gen_range(0.3..0.6),
                }
            })
            .collect();
        Self { items }
    }

    pub fn draw(&self, canvas: &mut Canvas, elapsed: Duration)
    {
        let width = canvas.width() as f32;
        let height = canvas.height() as f32;
        if width < 1.0 || height < 1.0 {
            return;
        }
        let secs = elapsed.as_secs_f32();
        for particle in &self.items {
            let wave = bob(secs + particle.delay);
            let x = (particle.x * width) as u16;
            let y = (particle.y * height - wave).max(0.0) as u16;
            let shade = particle.color.scaled(particle.brightness + 0.2 * wave);
            canvas.put(x, y, particle.glyph, Style::fg(shade));
        }
    }
}

/// Ease-in-out cycle from 0 up to 1 and back over `PERIOD_SECS`.
fn bob(secs: f32) -> f32
{
    let phase = (secs / PERIOD_SECS).fract();
    (1.0 - (phase * TAU).cos()) / 2.0
}
