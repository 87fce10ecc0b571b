use crate::error::Result;

use super::Surface;

fn width_of(s: &str) -> i64 {
    s.chars().count() as i64
}

impl Surface {
    /// Draw the frame one cell outside the logical canvas. Always redrawn in
    /// full.
    pub(crate) fn draw_border(&mut self) -> Result<()> {
        let Some(chars) = self.border.chars() else {
            return Ok(());
        };
        if self.too_big() {
            return Ok(());
        }
        let margin = self.margin();
        let (lr, tb) = (margin.lr as i64, margin.tb as i64);
        let (width, height) = (self.width as i64, self.height as i64);
        let across = chars
            .horizontal
            .repeat((width / width_of(chars.horizontal)) as usize);

        self.move_to_physical(lr - width_of(chars.top_left), tb - 1)?;
        self.print(&format!("{}{across}{}", chars.top_left, chars.top_right))?;
        for row in 0..height {
            self.move_to_physical(lr - width_of(chars.vertical), tb + row)?;
            self.print(chars.vertical)?;
            self.move_to_physical(lr + width, tb + row)?;
            self.print(chars.vertical)?;
        }
        self.move_to_physical(lr - width_of(chars.bottom_left), tb + height)?;
        self.print(&format!("{}{across}{}", chars.bottom_left, chars.bottom_right))
    }
}
