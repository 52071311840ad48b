/*
 *  display/render.rs
 *
 *  YearWatch - time, date, year and charge at a glance
 *  (c) 2020-26 Stuart Hunter
 *
 *  Region composition onto any embedded-graphics draw target
 *
 *  This program is free software: you can redistribute it and/or modify
 *  it under the terms of the GNU General Public License as published by
 *  the Free Software Foundation, either version 3 of the License, or
 *  (at your option) any later version.
 *
 *  This program is distributed in the hope that it will be useful,
 *  but WITHOUT ANY WARRANTY; without even the implied warranty of
 *  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *  GNU General Public License for more details.
 *
 *  See <http://www.gnu.org/licenses/> to get a copy of the GNU General
 *  Public License.
 *
 */

use embedded_graphics::mono_font::MonoTextStyleBuilder;
use embedded_graphics::pixelcolor::Gray4;
use embedded_graphics::prelude::*;
use embedded_text::alignment::VerticalAlignment;
use embedded_text::style::TextBoxStyleBuilder;
use embedded_text::TextBox;

use super::color::Color;
use super::region::{Region, RegionSet};

/// Draw the window background and every region in composition order
pub fn draw_window<D>(target: &mut D, regions: &RegionSet, background: Color) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Gray4>,
{
    target.fill_solid(&regions.bounds().rectangle(), background.to_gray4())?;
    for region in regions.iter() {
        draw_region(target, region)?;
    }
    Ok(())
}

/// Draw the window shifted down by `offset` pixels, used while sliding in
///
/// Whatever the window does not cover yet is blanked.
pub fn draw_window_at<D>(
    target: &mut D,
    regions: &RegionSet,
    background: Color,
    offset: i32,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Gray4>,
{
    if offset == 0 {
        return draw_window(target, regions, background);
    }
    target.clear(Color::Black.to_gray4())?;
    let mut shifted = target.translated(Point::new(0, offset));
    draw_window(&mut shifted, regions, background)
}

/// Fill the region background (if any) and draw its text
pub fn draw_region<D>(target: &mut D, region: &Region) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Gray4>,
{
    // collapsed battery bar
    if region.width() == 0 || region.height() == 0 {
        return Ok(());
    }

    if let Some(bg) = region.bg_color {
        target.fill_solid(&region.bounds, bg.to_gray4())?;
    }

    if region.text().is_empty() {
        return Ok(());
    }

    let character_style = MonoTextStyleBuilder::new()
        .font(region.font)
        .text_color(region.fg_color.to_gray4())
        .build();
    let textbox_style = TextBoxStyleBuilder::new()
        .alignment(region.alignment)
        .vertical_alignment(VerticalAlignment::Middle)
        .build();

    TextBox::with_textbox_style(region.text(), region.bounds, character_style, textbox_style)
        .draw(target)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::layout_manager::LayoutManager;
    use crate::display::region::RegionKind;
    use crate::display::ScreenBounds;
    use crate::format::ChargeLevel;
    use crate::vframebuf::VarFrameBuf;
    use embedded_graphics::primitives::Rectangle;

    const WHITE: Gray4 = Gray4::new(15);
    const LIGHT: Gray4 = Gray4::new(11);
    const BLACK: Gray4 = Gray4::new(0);

    fn rendered(percent: u8) -> (VarFrameBuf<Gray4>, RegionSet) {
        let mut manager = LayoutManager::new();
        manager.init_regions(ScreenBounds::new(144, 168)).unwrap();
        manager.set_text(RegionKind::Time, "09:05").unwrap();
        manager.set_battery_width(ChargeLevel::new(percent)).unwrap();
        let regions = manager.regions().unwrap().clone();

        let mut fb = VarFrameBuf::new(144, 168, BLACK);
        draw_window(&mut fb, &regions, Color::White).unwrap();
        (fb, regions)
    }

    #[test]
    fn test_band_backgrounds() {
        let (fb, _) = rendered(100);
        // corners stay clear of the centred text
        assert_eq!(fb.pixel(0, 0), Some(LIGHT));          // date band
        assert_eq!(fb.pixel(0, 52), Some(WHITE));         // time band over window
        assert_eq!(fb.pixel(0, 106), Some(LIGHT));        // year band
        assert_eq!(fb.pixel(0, 167), Some(BLACK));        // battery bar
        assert_eq!(fb.pixel(143, 167), Some(BLACK));
        assert_eq!(fb.pixel(0, 40), Some(WHITE));         // gap between date and time
    }

    #[test]
    fn test_partial_battery_bar() {
        let (fb, _) = rendered(50);
        assert_eq!(fb.pixel(0, 167), Some(BLACK));
        assert_eq!(fb.pixel(71, 167), Some(BLACK));
        assert_eq!(fb.pixel(72, 167), Some(WHITE));
        assert_eq!(fb.pixel(143, 150), Some(WHITE));
    }

    #[test]
    fn test_empty_battery_bar_draws_nothing() {
        let (fb, _) = rendered(0);
        let bar = Rectangle::new(Point::new(0, 150), Size::new(144, 18));
        assert_eq!(fb.count_in(&bar, WHITE), 144 * 18);
    }

    #[test]
    fn test_text_is_drawn() {
        let (fb, regions) = rendered(100);
        let time = regions.get(RegionKind::Time);
        assert!(fb.count_in(&time.bounds, BLACK) > 0);
        let date = regions.get(RegionKind::Date);
        assert!(fb.count_in(&date.bounds, WHITE) > 0);
    }

    #[test]
    fn test_shifted_window() {
        let mut manager = LayoutManager::new();
        manager.init_regions(ScreenBounds::new(144, 168)).unwrap();
        let regions = manager.regions().unwrap();

        let mut fb = VarFrameBuf::new(144, 168, WHITE);
        draw_window_at(&mut fb, regions, Color::White, 100).unwrap();
        // uncovered strip is blank, date band starts at the offset
        assert_eq!(fb.pixel(0, 0), Some(BLACK));
        assert_eq!(fb.pixel(0, 99), Some(BLACK));
        assert_eq!(fb.pixel(0, 100), Some(LIGHT));
    }
}
