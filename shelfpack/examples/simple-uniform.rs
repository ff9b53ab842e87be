use shelfpack::{InputItem, ShelfPacker};

fn main() {
    env_logger::init();

    let inputs: Vec<_> = (0..5)
        .map(|index| InputItem::new((128.0, 128.0), index))
        .collect();

    let packer = ShelfPacker::new((300.0, 300.0)).with_padding(8.0);
    let result = packer.pack(inputs);

    println!("Pack result: {:#?}", result);
}
