use iced::{
    Element, Length,
    widget::{Column, Row, column, container, container::bordered_box, image as iced_image, text},
};

/// A rendered panel ready for display
#[derive(Debug, Clone)]
pub struct PanelView {
    pub title: &'static str,
    pub handle: iced_image::Handle,
}

/// Two-by-two grid of titled panels
pub fn figure_grid<'a, Message>(panels: &'a [PanelView]) -> Element<'a, Message>
where
    Message: 'a,
{
    let mut grid = Column::new().spacing(10);
    for pair in panels.chunks(2) {
        let mut line = Row::new().spacing(10).height(Length::Fill);
        for view in pair {
            line = line.push(panel(view));
        }
        grid = grid.push(line);
    }

    container(grid)
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}

fn panel<'a, Message>(view: &'a PanelView) -> Element<'a, Message>
where
    Message: 'a,
{
    container(
        column![
            text(view.title).size(16),
            iced_image::viewer(view.handle.clone())
                .width(Length::Fill)
                .height(Length::Fill),
        ]
        .spacing(5),
    )
    .style(bordered_box)
    .padding(10)
    .width(Length::FillPortion(1))
    .height(Length::Fill)
    .into()
}
