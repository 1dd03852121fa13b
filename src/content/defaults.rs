use crate::content::{CardCover, ContentPack, Photo, Waypoint, Wish};

pub const DEFAULT_PACK_ID: &str = "birthday";

fn photo(id: &str, file: &str, title: &str, description: &str, year: Option<u16>) -> Photo {
    Photo {
        id: id.to_string(),
        file: file.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        year,
    }
}

fn waypoint(id: &str, name: &str, description: &str, distance_hours: u32, is_flight: bool) -> Waypoint {
    Waypoint {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        distance_hours,
        is_flight,
    }
}

fn wish(from: &str, message: &str) -> Wish {
    Wish {
        from: from.to_string(),
        message: message.to_string(),
    }
}

/// The birthday card shipped with the binary.
pub fn default_pack() -> ContentPack {
    ContentPack {
        id: DEFAULT_PACK_ID.to_string(),
        title: "Happy Birthday!".to_string(),
        description: "A birthday card for Dad with a puzzle, a journey and the family album".to_string(),
        version: "1.0.0".to_string(),
        cover: CardCover {
            title: "Happy Birthday!".to_string(),
            subtitle: "To an amazing father, doctor, and inspiration.".to_string(),
            photo_id: "photo7".to_string(),
        },
        photos: vec![
            photo("photo1", "photoshoot_group_with_grandma.JPG", "Family Photoshoot", "The whole family together with grandma", None),
            photo("photo2", "photoshoot_at_the_table.JPG", "Around the Table", "Family moment at the dinner table", None),
            photo("photo3", "in_front_of_school.JPG", "School Days", "In front of the school building", None),
            photo("photo4", "with_me_theather.heic", "Theater Visit", "At the theater together", None),
            photo("photo5", "entire_family_cousins_rome.jpg", "Rome Family Trip", "The extended family in Rome", None),
            photo("photo6", "with_kids_egypt.jpg", "Egyptian Adventure", "Family trip to Egypt", None),
            photo("photo7", "photoshoot_with_kids_on_steps.JPG", "Steps Photoshoot", "With the kids on the steps", None),
            photo("photo8", "photoshoot_kids_dad_on_the_phone_as_always.JPG", "Dad on the Phone", "Classic moment - dad on the phone during family photos", None),
            photo("photo9", "photoshoot_with_daughters.JPG", "With Daughters", "Dad with his daughters", None),
            photo("photo10", "photoshoot_all_jumping_except_brother.JPG", "Jump!", "Everyone jumping (except brother)", None),
            photo("photo11", "photoshoot_the_two_of_us.JPG", "The Two of Us", "Special father-child moment", None),
            photo("photo12", "me_filming_him_for_work.jpg", "Filming Dad", "Helping dad with work recording", None),
            photo("photo13", "at_my_brothers_graduation.JPG", "Graduation Day", "At brother's graduation ceremony", Some(2019)),
            photo("photo14", "old_my_brothers_first_grade.jpg", "First Grade", "Brother's first day of school", Some(2010)),
            photo("photo15", "my_19_birthday_with_siblings.JPG", "19th Birthday", "Celebrating with siblings", Some(2020)),
            photo("photo16", "old_school_photo.JPG", "Old School Photo", "Classic school picture from years ago", Some(2005)),
            photo("photo17", "school_photo.jpg", "School Portrait", "Recent school photo", Some(2018)),
            photo("photo18", "funnt_selfie_with_bunny_ears.JPG", "Bunny Ears", "Funny selfie with bunny ears filter", None),
            photo("photo19", "old_easter_church_with_grandma.JPG", "Easter at Church", "Easter celebration at church with grandma", Some(2008)),
            photo("photo20", "my_graduation.JPG", "Graduation Day", "At my graduation ceremony", Some(2022)),
        ],
        puzzle_photo_ids: ["photo1", "photo7", "photo9", "photo11"]
            .iter()
            .map(|id| id.to_string())
            .collect(),
        card_photo_ids: ["photo1", "photo5", "photo6", "photo9", "photo10", "photo20"]
            .iter()
            .map(|id| id.to_string())
            .collect(),
        waypoints: vec![
            waypoint("kyiv", "Kyiv", "The start of a loooong road. Also the city where your fifth child lives.", 0, false),
            waypoint("dessau", "Dessau", "Dessau, Germany: a lot of people are waiting for you here! A long drive, but worth it.", 24, false),
            waypoint("nuremberg", "Nuremberg", "Nuremberg: drop by the training of the family's lead dancer!", 30, false),
            waypoint("munich", "Munich", "Munich: the last stop in Europe. We really are scattered around the world, but you are awaited everywhere!", 31, false),
            waypoint("toronto", "Toronto", "Toronto: wow, they are waiting for you here too!", 39, true),
        ],
        wishes: vec![
            wish("Your son", "Dad, you've always been my role model and inspiration. Your dedication to work and family shows me what it means to be a great man. Happy Birthday!"),
            wish("Your oldest daughter", "Thank you for always supporting my dreams, even when they took me far from home. Your strength and wisdom guide me every day. Love you, papa!"),
            wish("Your youngest children", "We miss you so much when you're far away, but we're so proud of you and everything you do! Can't wait for our next family adventure. Happy Birthday!"),
            wish("Your family in Canada", "Distance may separate us, but family bonds remain strong. Thinking of you on your special day. Remember our childhood adventures? Happy Birthday, brother!"),
        ],
    }
}
