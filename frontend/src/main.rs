mod widget;

fn main() {
    widget::mount_all();
}
